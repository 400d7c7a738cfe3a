mod all;
mod footer;
mod home;
mod log;
mod navbar;
mod posts;
mod tasks;

use self::log::log;
use super::*;
use footer::footer;
use home::home;
use navbar::navbar;
use posts::posts;
use tasks::tasks;

pub use all::all as render;
