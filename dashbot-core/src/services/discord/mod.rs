pub mod prefix;
pub mod slashcommands;
