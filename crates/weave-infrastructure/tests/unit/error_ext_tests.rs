//! Error Extension Tests

use std::io;
use weave_domain::error::{Error, Result};
use weave_infrastructure::error_ext::ErrorContext;

#[test]
fn test_io_context_keeps_source() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

    let result: Result<()> = Err(io_error).io_context("failed to read file");

    if let Err(Error::Io { source, message }) = result {
        assert!(message.contains("failed to read file"));
        assert!(source.is_some());
    } else {
        panic!("Expected Io error");
    }
}

#[test]
fn test_config_context_maps_to_configuration() {
    let parse_error = "abc".parse::<u64>();
    let result = parse_error.config_context("bad timeout");
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_with_context_is_lazy() {
    let ok: std::result::Result<u8, io::Error> = Ok(3);
    let value = ok
        .with_context(|| -> String { panic!("context built for a success") })
        .unwrap();
    assert_eq!(value, 3);

    let failed: std::result::Result<u8, io::Error> = Err(io::Error::other("disk"));
    let err = failed.with_context(|| "loading module").unwrap_err();
    assert_eq!(err.to_string(), "Internal error: loading module: disk");
}

#[test]
fn test_module_context_maps_to_module() {
    let err = "x".parse::<u16>().module_context("parsing port").unwrap_err();
    assert!(matches!(err, Error::Module { .. }));
    assert!(err.to_string().starts_with("Module error: parsing port: "));
}
