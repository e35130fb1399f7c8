//! Cross-module scenarios over whole extraction archives.


mod parser_modes;
