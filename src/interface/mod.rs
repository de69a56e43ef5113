//! Interface layer
//! 사용자 입력(CLI/REPL)을 유스케이스 호출로 연결한다.

pub mod cli;
