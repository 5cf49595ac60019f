/*
[INPUT]:  Parsed CLI subcommands
[OUTPUT]: Non-TUI command implementations
[POS]:    CLI module for the agrisync-tasks binary
[UPDATE]: When adding subcommands
*/

pub mod init;
pub mod list;
