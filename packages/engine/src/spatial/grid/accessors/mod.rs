mod type_color;
mod cell_ops;
mod updated;
mod pointers;
