mod core;

pub(crate) use self::core::{CoreBootstrap, build_core};
