pub mod camera;
pub mod clock;
pub mod earth;
pub mod iss;
pub mod ui;
