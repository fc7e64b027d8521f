pub mod table;

pub use table::TableStore;
