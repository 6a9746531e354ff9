use bytes::BufMut;

use crate::{
    generator::ValueGenerator,
    rand::RandSource,
    serializer::{FormattingProfile, Serializer},
};

/// Generates one top-level document, draws its profile, and appends the
/// rendering to `out`.
///
/// Returns the profile the document was rendered with.
pub fn write_document<R, B>(rng: &mut R, out: &mut B) -> FormattingProfile
where
    R: RandSource,
    B: BufMut,
{
    let document = ValueGenerator::new(rng).generate_document();
    let profile = FormattingProfile::random(rng);
    Serializer::new(profile).serialize_into(&document, out);
    profile
}
