//! Domain layer
//! 패널 분할 규칙과 기사/변환 엔티티를 외부 의존성 없이 표현한다.

pub mod article;
pub mod panel;
pub mod policy;
pub mod pool;
pub mod segment;
pub mod title;
