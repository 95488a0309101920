// Not every test binary uses every helper.
#![allow(dead_code)]

pub mod mock_provider;
pub mod suite;
