mod common;
mod composer;
mod explain;
