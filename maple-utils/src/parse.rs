/// A named duration vocabulary: which unit letters are accepted and what
/// each one multiplies the number by, counted in `base_unit`.
///
/// The two shipped profiles disagree on what `m` and `d` mean and even on
/// the unit of the result, so callers always pick a profile explicitly.
#[derive(Clone, Copy, Debug)]
pub struct DurationProfile {
    pub name: &'static str,
    pub base_unit: &'static str,
    units: &'static [(char, u64)],
}

/// Vocabulary of the message-based moderation flow: `m`inutes, `h`ours,
/// `d`ays, normalized to minutes.
pub const LEGACY_PROFILE: DurationProfile = DurationProfile {
    name: "legacy",
    base_unit: "minutes",
    units: &[('m', 1), ('h', 60), ('d', 60 * 24)],
};

/// Vocabulary of the restriction commands: `d`ays, `m`onths (30 days),
/// `y`ears (365 days), normalized to seconds.
pub const RESTRICTION_PROFILE: DurationProfile = DurationProfile {
    name: "restriction",
    base_unit: "seconds",
    units: &[('d', 86_400), ('m', 30 * 86_400), ('y', 365 * 86_400)],
};

impl DurationProfile {
    fn multiplier(&self, unit: char) -> Option<u64> {
        let wanted = unit.to_ascii_lowercase();
        self.units
            .iter()
            .find(|(letter, _)| *letter == wanted)
            .map(|(_, factor)| *factor)
    }

    /// Accepted unit letters for usage and error messages, e.g. "d, m, y".
    pub fn unit_letters(&self) -> String {
        self.units
            .iter()
            .map(|(letter, _)| letter.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Returned for any duration string that does not parse under the given
/// profile.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid duration `{input}`: expected `<number><unit>` with one of: {allowed}")]
pub struct InvalidDurationFormat {
    pub input: String,
    pub allowed: String,
}

/// Parse a compact duration token like `7d` or `2h` into a count of the
/// profile's base unit.
///
/// The input must split into exactly one leading digit run and one
/// trailing unit letter from the profile (case-insensitive), and the
/// number must be a positive integer.
pub fn parse_duration(raw: &str, profile: &DurationProfile) -> Result<u64, InvalidDurationFormat> {
    let input = raw.trim();
    let invalid = || InvalidDurationFormat {
        input: input.to_owned(),
        allowed: profile.unit_letters(),
    };

    let digit_end = input
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(input.len());
    let (number_part, unit_part) = input.split_at(digit_end);

    let mut unit_chars = unit_part.chars();
    let (Some(unit), None) = (unit_chars.next(), unit_chars.next()) else {
        return Err(invalid());
    };

    let number = number_part.parse::<u64>().ok().filter(|n| *n > 0);
    let (Some(number), Some(factor)) = (number, profile.multiplier(unit)) else {
        return Err(invalid());
    };

    number.checked_mul(factor).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::{LEGACY_PROFILE, RESTRICTION_PROFILE, parse_duration};

    #[test]
    fn legacy_profile_normalizes_to_minutes() {
        assert_eq!(parse_duration("30m", &LEGACY_PROFILE), Ok(30));
        assert_eq!(parse_duration("2h", &LEGACY_PROFILE), Ok(120));
        assert_eq!(parse_duration("7d", &LEGACY_PROFILE), Ok(7 * 1_440));
    }

    #[test]
    fn restriction_profile_normalizes_to_seconds() {
        assert_eq!(parse_duration("7d", &RESTRICTION_PROFILE), Ok(7 * 86_400));
        assert_eq!(parse_duration("1m", &RESTRICTION_PROFILE), Ok(30 * 86_400));
        assert_eq!(parse_duration("1y", &RESTRICTION_PROFILE), Ok(365 * 86_400));
    }

    #[test]
    fn profiles_are_not_merged() {
        // `m` is minutes in one vocabulary and months in the other, and
        // `h`/`y` each exist in only one of them.
        assert_eq!(parse_duration("5m", &LEGACY_PROFILE), Ok(5));
        assert_eq!(parse_duration("5m", &RESTRICTION_PROFILE), Ok(5 * 30 * 86_400));
        assert!(parse_duration("2h", &RESTRICTION_PROFILE).is_err());
        assert!(parse_duration("1y", &LEGACY_PROFILE).is_err());
    }

    #[test]
    fn unit_letters_match_case_insensitively() {
        assert_eq!(parse_duration("7D", &RESTRICTION_PROFILE), Ok(7 * 86_400));
        assert_eq!(parse_duration(" 2H ", &LEGACY_PROFILE), Ok(120));
    }

    #[test]
    fn parsing_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(parse_duration("7d", &RESTRICTION_PROFILE), Ok(604_800));
        }
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        for raw in ["abc", "10", "", "d7", "7dd", "7d7", "7 d x", "0d", "-3d", "7w"] {
            assert!(
                parse_duration(raw, &RESTRICTION_PROFILE).is_err(),
                "expected `{raw}` to be rejected"
            );
        }
    }

    #[test]
    fn error_names_the_accepted_units() {
        let err = parse_duration("9q", &RESTRICTION_PROFILE).unwrap_err();
        assert_eq!(err.allowed, "d, m, y");
        assert_eq!(err.input, "9q");
    }
}
