pub mod dispatcher;
pub mod registry;
pub mod resolver;
pub mod storage;
