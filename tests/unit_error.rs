/// Unit tests for DiError and DiResult types
/// These tests specifically target mutations found by cargo-mutants

use compose_di::{DiError, DiResult};
use std::error::Error;

#[test]
fn test_error_display_not_registered() {
    let error = DiError::NotRegistered("TestService");
    let display_str = format!("{}", error);
    assert_eq!(display_str, "Could not find resolver for TestService");

    // Verify it's not an empty string or default
    assert!(!display_str.is_empty());
    assert!(display_str.contains("TestService"));
    assert!(display_str.contains("Could not find"));
}

#[test]
fn test_error_display_type_mismatch() {
    let error = DiError::TypeMismatch("std::string::String");
    let display_str = format!("{}", error);
    assert_eq!(display_str, "Type mismatch for: std::string::String");

    // Verify specific content
    assert!(display_str.contains("std::string::String"));
    assert!(display_str.contains("mismatch"));
}

#[test]
fn test_error_display_duplicate_registration() {
    let error = DiError::DuplicateRegistration {
        service: "myapp::Database",
        existing: "make_db (primary -> myapp::Database)".to_string(),
        attempted: "make_other_db (primary -> myapp::Database)".to_string(),
    };
    let display_str = format!("{}", error);
    assert_eq!(
        display_str,
        "Attempted to register make_other_db (primary -> myapp::Database) as primary \
         implementation of myapp::Database, but a primary registration already exists: \
         make_db (primary -> myapp::Database)"
    );

    assert!(display_str.contains("already exists"));
    assert!(display_str.contains("make_db"));
    assert!(display_str.contains("make_other_db"));
}

#[test]
fn test_error_display_depth_exceeded() {
    let error = DiError::DepthExceeded {
        service: "myapp::Transport",
        depth: 3,
        resolvers: 2,
    };
    let display_str = format!("{}", error);
    assert_eq!(
        display_str,
        "Decorator depth 3 exceeds the 2 registered resolver(s) for myapp::Transport"
    );

    assert!(display_str.contains("3"));
    assert!(display_str.contains("exceeds"));
    assert!(display_str.contains("myapp::Transport"));
}

#[test]
fn test_error_display_resolution_failed() {
    let error = DiError::ResolutionFailed {
        service: "myapp::Transport",
        depth: 1,
        registrations: "wrap (decorator -> myapp::Transport); make (primary -> myapp::Transport)"
            .to_string(),
        source: Box::new(DiError::Factory("socket unavailable".to_string())),
    };
    let display_str = format!("{}", error);
    assert_eq!(
        display_str,
        "Could not resolve myapp::Transport with decorator depth 1 - registrations: \
         wrap (decorator -> myapp::Transport); make (primary -> myapp::Transport)"
    );

    assert!(display_str.contains("decorator depth 1"));
    assert!(display_str.contains("wrap (decorator"));
    assert!(display_str.contains("make (primary"));
}

#[test]
fn test_error_display_factory() {
    let error = DiError::Factory("socket unavailable".to_string());
    let display_str = format!("{}", error);
    assert_eq!(display_str, "Factory error: socket unavailable");

    assert!(display_str.contains("socket unavailable"));
}

#[test]
fn test_diresult_ok() {
    let result: DiResult<String> = Ok("success".to_string());
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), "success");
}

#[test]
fn test_diresult_err() {
    let result: DiResult<String> = Err(DiError::NotRegistered("TestService"));
    assert!(result.is_err());

    match result {
        Err(DiError::NotRegistered(name)) => assert_eq!(name, "TestService"),
        _ => panic!("Expected NotRegistered error"),
    }
}

#[test]
fn test_error_debug_format() {
    let error = DiError::NotRegistered("TestService");
    let debug_str = format!("{:?}", error);

    // Debug format should contain the variant name and field
    assert!(debug_str.contains("NotRegistered"));
    assert!(debug_str.contains("TestService"));
}

#[test]
fn test_error_clone() {
    let error = DiError::ResolutionFailed {
        service: "myapp::Transport",
        depth: 0,
        registrations: "make (primary -> myapp::Transport)".to_string(),
        source: Box::new(DiError::Factory("boom".to_string())),
    };
    let cloned = error.clone();

    // Both should format the same way, source included
    assert_eq!(format!("{}", error), format!("{}", cloned));
    assert_eq!(
        format!("{}", error.source().unwrap()),
        format!("{}", cloned.source().unwrap()),
    );
}

#[test]
fn test_error_as_std_error() {
    let error = DiError::NotRegistered("TestService");

    // Should implement std::error::Error
    let _: &dyn std::error::Error = &error;

    // Leaf variants have no source
    assert!(error.source().is_none());
}

#[test]
fn test_resolution_failed_source_chain() {
    let error = DiError::ResolutionFailed {
        service: "myapp::Root",
        depth: 0,
        registrations: "make_root (primary -> myapp::Root)".to_string(),
        source: Box::new(DiError::ResolutionFailed {
            service: "myapp::Leaf",
            depth: 0,
            registrations: "make_leaf (primary -> myapp::Leaf)".to_string(),
            source: Box::new(DiError::Factory("boom".to_string())),
        }),
    };

    // Walk the chain down to the factory failure
    let mid = error.source().unwrap();
    assert!(mid.to_string().contains("myapp::Leaf"));
    let leaf = mid.source().unwrap();
    assert_eq!(leaf.to_string(), "Factory error: boom");
    assert!(leaf.source().is_none());
}
