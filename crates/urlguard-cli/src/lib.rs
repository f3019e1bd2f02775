//! Front ends for urlguard: training and classification subcommands and the
//! HTTP scan service.
pub mod classify;
pub mod serve;
pub mod train;
