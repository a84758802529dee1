pub mod motion;
pub mod navigation;
pub mod pointer;
pub mod resize;
pub mod time;
