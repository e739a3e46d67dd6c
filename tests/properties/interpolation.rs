//! Property tests for variable interpolation.

use std::collections::BTreeMap;

use proptest::prelude::*;

use kube_deploy::domain::services::expand;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Expansion never panics, whatever the input.
    #[test]
    fn property_expand_never_panics(input in any::<String>()) {
        let _ = expand(&input, |_| Some("x".to_string()));
        let _ = expand(&input, |_| None);
    }

    /// PROPERTY: With nothing known, the input comes back unchanged.
    #[test]
    fn property_unknown_references_stay_verbatim(input in "[a-zA-Z0-9_${} .:-]{0,64}") {
        prop_assert_eq!(expand(&input, |_| None), input);
    }

    /// PROPERTY: Text without `$` is never altered.
    #[test]
    fn property_text_without_dollar_is_untouched(input in "[^$]{0,64}") {
        prop_assert_eq!(expand(&input, |_| Some("value".to_string())), input);
    }

    /// PROPERTY: Braced and bare references to a known name expand alike.
    #[test]
    fn property_braced_and_bare_agree(
        name in "[A-Z_][A-Z0-9_]{0,8}",
        value in "[a-z0-9./-]{0,16}",
    ) {
        let vars = BTreeMap::from([(name.clone(), value.clone())]);
        let lookup = |key: &str| vars.get(key).cloned();

        let braced = expand(&format!("a=${{{}}};", name), lookup);
        let bare = expand(&format!("a=${};", name), lookup);

        prop_assert_eq!(&braced, &format!("a={};", value));
        prop_assert_eq!(braced, bare);
    }

    /// PROPERTY: Substituted values are not expanded again.
    #[test]
    fn property_expansion_is_single_pass(name in "[A-Z][A-Z0-9_]{0,8}") {
        let value = format!("${}", name);
        let result = expand(&format!("${{{}}}", name), |key: &str| {
            (key == name).then(|| value.clone())
        });
        prop_assert_eq!(result, value);
    }
}
