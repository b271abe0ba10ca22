//! 命令列子指令的實作，`main` 只負責輸出與退出碼
pub mod commands;
