mod alloc;
mod persistence;
