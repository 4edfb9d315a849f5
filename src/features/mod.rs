pub mod aigc;
pub mod cet6;

pub use aigc::AigcService;
pub use cet6::Cet6Service;
