//! Low-level byte handling shared by the table writers, heap builders and blob encoders.

pub mod io;
