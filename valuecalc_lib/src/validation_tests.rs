use super::*;

// -- Ticker validation --

#[test]
fn ticker_valid() {
    assert_eq!(validate_ticker("TCS.NS").unwrap().as_str(), "TCS.NS");
}

#[test]
fn ticker_trimmed() {
    assert_eq!(validate_ticker("  INFY.NS \n").unwrap().as_str(), "INFY.NS");
}

#[test]
fn ticker_case_preserved() {
    assert_eq!(validate_ticker("aapl").unwrap().as_str(), "aapl");
}

#[test]
fn ticker_empty() {
    assert!(matches!(
        validate_ticker(""),
        Err(ValuecalcError::InvalidInput(_))
    ));
}

#[test]
fn ticker_whitespace_only() {
    assert!(validate_ticker("   ").is_err());
    assert!(validate_ticker("\t\n").is_err());
}

#[test]
fn ticker_control_chars_kept() {
    assert_eq!(validate_ticker("TC\u{7}S").unwrap().as_str(), "TC\u{7}S");
}

#[test]
fn ticker_inner_space_kept() {
    assert_eq!(validate_ticker("BRK B").unwrap().as_str(), "BRK B");
}

#[test]
fn ticker_padding_not_counted() {
    let padded = format!("{:<40}", "TCS.NS");
    assert_eq!(validate_ticker(&padded).unwrap().as_str(), "TCS.NS");
}

#[test]
fn ticker_long_input_passed_through() {
    let long = "A".repeat(64);
    assert_eq!(validate_ticker(&long).unwrap().as_str(), long);
}

#[test]
fn ticker_empty_message() {
    let err = validate_ticker("").unwrap_err();
    assert!(err.to_string().contains("please enter a valid stock ticker"));
}

// -- Method parsing --

#[test]
fn methods_empty() {
    let empty: [&str; 0] = [];
    assert!(parse_methods(&empty).unwrap().is_empty());
}

#[test]
fn methods_all_names() {
    let methods = parse_methods(&["dcf", "pe", "ddm", "ev-ebitda"]).unwrap();
    assert_eq!(methods.len(), 4);
}

#[test]
fn methods_deduplicated() {
    let methods = parse_methods(&["DCF", "dcf", "Dcf"]).unwrap();
    assert_eq!(methods.into_iter().collect::<Vec<_>>(), vec![MethodId::Dcf]);
}

#[test]
fn methods_owned_strings() {
    let inputs = vec!["ddm".to_string(), "ev_ebitda".to_string()];
    let methods = parse_methods(&inputs).unwrap();
    assert!(methods.contains(&MethodId::Ddm));
    assert!(methods.contains(&MethodId::EvEbitda));
}

#[test]
fn methods_unknown_rejected() {
    let err = parse_methods(&["dcf", "graham"]).unwrap_err();
    assert!(err.to_string().contains("graham"));
}
