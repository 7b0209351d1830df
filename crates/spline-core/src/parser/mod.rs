mod text;
mod xml;

pub use text::{parse_cross_section_table, parse_flux_source, read_cross_section_table, read_flux_file};
pub use xml::{parse_spline_document, read_spline_file, read_spline_files};

use crate::domain::{NeutrinoFlavor, ParserResult, SplineDescription, SplineError};

const SEGMENT_DELIMITER: char = ';';
const PATH_DELIMITER: char = '/';
const KEY_VALUE_DELIMITER: char = ':';

/// Parses a GENIE spline annotation such as
/// `genie::ReinSeghalCOHPiPXSec/Default/nu:-14;tgt:1000060120;proc:Weak[CC],COH;`.
///
/// The algorithm is the text after the last `:` of the first `/` token, so a
/// `genie::` prefix is optional. The flavor is decoded from the text after the
/// last `:` of the final `/` token. Later segments without a `:` are skipped;
/// the rest are stored verbatim, split on their first `:`.
pub fn parse_description(description: &str) -> ParserResult<SplineDescription> {
    let mut segments = description.split(SEGMENT_DELIMITER);
    let header = segments
        .next()
        .filter(|segment| !segment.trim().is_empty())
        .ok_or_else(|| {
            SplineError::input_validation(
                "INPUT.DESCRIPTION",
                format!("spline description '{description}' has no algorithm segment"),
            )
        })?;

    let mut path_tokens = header.split(PATH_DELIMITER);
    let algorithm_token = path_tokens.next().unwrap_or(header);
    let flavor_token = path_tokens.next_back().unwrap_or(algorithm_token);

    let mut parsed = SplineDescription::new(
        last_colon_field(algorithm_token),
        NeutrinoFlavor::from_pdg_code(last_colon_field(flavor_token)),
    );

    for segment in segments {
        if let Some((key, value)) = segment.split_once(KEY_VALUE_DELIMITER) {
            parsed.fields.insert(key.to_string(), value.to_string());
        }
    }

    Ok(parsed)
}

fn last_colon_field(token: &str) -> &str {
    token
        .rsplit_once(KEY_VALUE_DELIMITER)
        .map_or(token, |(_, tail)| tail)
}

#[cfg(test)]
mod tests {
    use super::parse_description;
    use crate::domain::{NeutrinoFlavor, SplineErrorCategory};

    const COHERENT_PION: &str = "genie::ReinSeghalCOHPiPXSec/Default/nu:-14;tgt:1000060120;proc:Weak[CC],COH;hmult:(p=0,n=0,pi+=0,pi-=1,pi0=0);";

    #[test]
    fn annotation_decodes_algorithm_flavor_and_fields() {
        let description = parse_description(COHERENT_PION).expect("annotation should parse");

        assert_eq!(description.algorithm, "ReinSeghalCOHPiPXSec");
        assert_eq!(description.flavor, NeutrinoFlavor::MuonAntineutrino);
        assert_eq!(description.target_code(), Some("1000060120"));
        assert_eq!(description.process(), Some("Weak[CC],COH"));
        assert_eq!(
            description.hadron_multiplicity(),
            Some("(p=0,n=0,pi+=0,pi-=1,pi0=0)")
        );
        let keys: Vec<&str> = description.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, ["tgt", "proc", "hmult"]);
    }

    #[test]
    fn namespace_prefix_is_optional() {
        let description =
            parse_description("QELCCPXSec/Default/nu:14;tgt:1000010010;").expect("should parse");
        assert_eq!(description.algorithm, "QELCCPXSec");
        assert_eq!(description.flavor, NeutrinoFlavor::MuonNeutrino);
    }

    #[test]
    fn segments_without_colon_are_skipped() {
        let description =
            parse_description("genie::DISXSec/CC/nu:12;N:2112;garbage;;tgt:1000080160;")
                .expect("should parse");
        let keys: Vec<&str> = description.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, ["N", "tgt"]);
    }

    #[test]
    fn values_keep_everything_after_the_first_colon() {
        let description =
            parse_description("genie::X/Y/nu:16;note:a:b;").expect("should parse");
        assert_eq!(description.get("note"), Some("a:b"));
        assert_eq!(description.flavor, NeutrinoFlavor::TauNeutrino);
    }

    #[test]
    fn repeated_keys_keep_the_last_value_at_the_first_position() {
        let description =
            parse_description("genie::X/Y/nu:-12;tgt:1;proc:Weak[NC];tgt:2;").expect("should parse");
        assert_eq!(description.target_code(), Some("2"));
        let keys: Vec<&str> = description.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, ["tgt", "proc"]);
    }

    #[test]
    fn unknown_flavor_code_does_not_fail() {
        let description = parse_description("genie::X/Y/nu:11;").expect("should parse");
        assert_eq!(description.flavor, NeutrinoFlavor::Unknown);

        let bare = parse_description("genie::OnlyAlgorithm").expect("should parse");
        assert_eq!(bare.algorithm, "OnlyAlgorithm");
        assert_eq!(bare.flavor, NeutrinoFlavor::Unknown);
        assert!(bare.fields.is_empty());
    }

    #[test]
    fn missing_header_segment_is_rejected() {
        for source in ["", ";tgt:1000060120;", "   ;proc:Weak[CC]"] {
            let error = parse_description(source).expect_err("header is required");
            assert_eq!(error.category(), SplineErrorCategory::InputValidationError);
            assert_eq!(error.placeholder(), "INPUT.DESCRIPTION");
        }
    }
}
