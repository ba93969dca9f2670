mod common;

mod rate;
