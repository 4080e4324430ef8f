use nanoid::nanoid;

const ALPHABET: [char; 36] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

/// Generates a 16 character identifier made of uppercase letters and digits
///
/// Used to name temporary files so that concurrent writers in the same
/// directory never share one.
#[must_use]
pub fn get_id() -> String {
    nanoid!(16, &ALPHABET)
}
