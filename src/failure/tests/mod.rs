mod interfaces;
mod nodes;
