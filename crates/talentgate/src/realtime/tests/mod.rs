mod common;
mod presence;
