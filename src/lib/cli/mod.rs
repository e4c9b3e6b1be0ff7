//! The command line surface of the program: the parsed user input and the
//! launching of the external commands
pub mod input;
pub mod output;
