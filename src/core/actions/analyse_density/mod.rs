pub mod analyse_density;
pub mod density_statistics;
pub mod find_interesting_point;
