pub mod chart;
pub mod detail_list;
pub mod header;
pub mod ranked;
pub mod status;
pub mod tables;
pub mod totals;
