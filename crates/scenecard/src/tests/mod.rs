
mod names;
mod scan_good;
