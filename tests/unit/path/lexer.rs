use super::*;

#[test]
fn commands_pair_with_their_numbers() {
    let groups = lex_path("M0,0 L10,0 L10,10").unwrap();
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].cmd, b'M');
    assert_eq!(groups[0].args.as_slice(), [0.0, 0.0]);
    assert_eq!(groups[2].args.as_slice(), [10.0, 10.0]);
}

#[test]
fn case_is_preserved_on_command_letters() {
    let groups = lex_path("m5,5h20").unwrap();
    assert_eq!(groups[0].cmd, b'm');
    assert_eq!(groups[1].cmd, b'h');
    assert_eq!(groups[1].args.as_slice(), [20.0]);
}

#[test]
fn bare_minus_starts_a_new_number() {
    let groups = lex_path("M10-5").unwrap();
    assert_eq!(groups[0].args.as_slice(), [10.0, -5.0]);
}

#[test]
fn exponents_do_not_split_numbers() {
    let groups = lex_path("M1e-5 2E+3 .5").unwrap();
    assert_eq!(groups[0].args.as_slice(), [1e-5, 2e3, 0.5]);
}

#[test]
fn leading_dot_and_trailing_dot_mantissas() {
    assert_eq!(lex_numbers("-.5 5. 1.25").unwrap(), vec![-0.5, 5.0, 1.25]);
}

#[test]
fn separators_collapse() {
    assert_eq!(lex_numbers("1,2,,3  ,4").unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn unknown_letter_is_an_error() {
    let err = lex_path("M0,0 X5").unwrap_err();
    assert!(matches!(err, CubistError::PathSyntax(_)));
}

#[test]
fn number_before_command_is_an_error() {
    let err = lex_path("5,5 M0,0").unwrap_err();
    assert!(matches!(err, CubistError::PathSyntax(_)));
}

#[test]
fn dangling_exponent_is_an_error() {
    let err = lex_numbers("1e").unwrap_err();
    assert!(matches!(err, CubistError::Numeric(_)));
}

#[test]
fn garbage_token_is_an_error() {
    assert!(lex_numbers("1 2 abc").is_err());
    assert!(lex_numbers(".").is_err());
}

#[test]
fn parse_number_requires_exactly_one() {
    assert_eq!(parse_number(" 42 ").unwrap(), 42.0);
    assert!(parse_number("1 2").is_err());
    assert!(parse_number("").is_err());
}

#[test]
fn empty_input_lexes_to_nothing() {
    assert!(lex_path("").unwrap().is_empty());
    assert!(lex_path("  \n ").unwrap().is_empty());
    assert!(lex_numbers("").unwrap().is_empty());
}
