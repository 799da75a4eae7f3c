//! facildl - command-line front end for facilcore

pub mod cli;
