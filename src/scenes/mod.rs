pub mod lattice;
