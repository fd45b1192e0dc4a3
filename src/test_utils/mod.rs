#![allow(missing_docs)]

pub(crate) mod http;
pub(crate) mod server;

pub(crate) use http::{assert_content_type, assert_error_message, get_header};
pub(crate) use server::{
    TEST_PASSWORD, must_create_test_server, must_create_test_state, must_register,
};
