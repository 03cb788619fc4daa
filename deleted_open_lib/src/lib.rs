pub mod lsof;
pub mod ps;
pub mod report;
pub mod size;
