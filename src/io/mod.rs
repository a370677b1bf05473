//! Filesystem-facing pieces: the zip sink, output paths, checksums, and config files

pub mod archive;
pub mod checksum;
pub mod config_file;
pub mod destination;
