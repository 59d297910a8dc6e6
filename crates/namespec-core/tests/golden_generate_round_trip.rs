use namespec_core::{
    generate, match_name, parse_structure, Category, Counters, Error, GenerationRequest,
    NamingConfig, TokenValue, DEFAULT_TEMPLATE,
};

#[test]
fn golden_generate_round_trip() {
    let structure = parse_structure(DEFAULT_TEMPLATE).unwrap();
    let config = NamingConfig::default();
    let mut counters = Counters::default();

    let request = GenerationRequest::new("door")
        .with(Category::Type, TokenValue::Literal("prp".into()))
        .with(Category::Zoning, TokenValue::Literal("TpLt".into()))
        .with(Category::Orientation, TokenValue::Literal("NtEt".into()))
        .with(Category::AlphabeticalInc, TokenValue::Auto)
        .with(Category::NumericalInc, TokenValue::Auto);

    let name = generate(&structure, &config, &request, &mut counters).unwrap();
    assert_eq!(name, "prp_doorTpLtNtEtA_001");

    // what generation assembled, matching takes apart identically
    let matched = match_name(&structure, &config, &name);
    assert!(matched.is_valid(), "problems: {:?}", matched.problems());
    assert_eq!(matched.value(Category::Symmetry), None);
    assert_eq!(matched.value(Category::Type), Some("prp"));
    assert_eq!(matched.value(Category::Name), Some("door"));
    assert_eq!(matched.value(Category::Zoning), Some("TpLt"));
    assert_eq!(matched.value(Category::Orientation), Some("NtEt"));
    assert_eq!(matched.value(Category::AlphabeticalInc), Some("A"));
    assert_eq!(matched.value(Category::NumericalInc), Some("001"));

    // composites read row then column; the transposed form is refused
    let transposed = GenerationRequest::new("door")
        .with(Category::Type, TokenValue::Literal("prp".into()))
        .with(Category::Zoning, TokenValue::Literal("LtTp".into()));
    let err = generate(&structure, &config, &transposed, &mut counters).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidTokenValue {
            category: Category::Zoning,
            ..
        }
    ));
}
