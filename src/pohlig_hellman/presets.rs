//! The SIKEp751 field and its fixed pairing generators.
//!
//! p751 = 2^372·3^239 − 1, so the norm-1 subgroup of GF(p751²) carries a
//! 2^372-torsion and a 3^239-torsion component. The generators below are the
//! reduced Tate pairing values e(P, Q) of the public torsion bases; they have
//! exact order 2^372 and 3^239 respectively, and compressed public keys
//! express their pairing data as discrete logs relative to them.

use crypto_bigint::modular::runtime_mod::DynResidueParams;
use crypto_bigint::{Uint, U768};

use crate::fp2::Fp2;
use crate::DlogError;

use super::{PohligHellman, SubgroupParameters, SubgroupPrime};

/// GF(p751²) elements in the crate's generic representation.
pub type Fp2P751 = Fp2<{ U768::LIMBS }>;

/// p751 = 2^372·3^239 − 1.
pub const P751_HEX: &str = "00006FE5D541F71C0E12909F97BADC668562B5045CB25748084E9867D6EBE876DA959B1A13F7CC76E3EC968549F878A8EEAFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF";

/// e(P2, Q2), of exact order 2^372.
const TWO_TORSION_GENERATOR: (&str, &str) = (
    "000028832AA5FC105113FE158F94BF5C8191F8B3F8D1D8ACE95978C4E0EF39C68A034E0B9D916254E4A46BC226A465FE7E7D2D33D7DBF57D2D6DBC600480F7FE4FE548B941FE834CDBD5AFB1FBB1DF0D39B7914DE41522D86F7867251527C203",
    "0000028F72C6BFBD4193637DD42C95DBDA37329CB55DDF3BA1C51E01218B635E2D64849372AEBBEA459F8BE21D16762CE0EC45F46674F5B85A2CA5078611519DE57E57E6E84D3C28031E40E9808455C49369CFBDE846F5C0E61C1450BB9F84E7",
);

/// e(P3, Q3), of exact order 3^239.
const THREE_TORSION_GENERATOR: (&str, &str) = (
    "0000346652514C25C47102295737F1A9BB147D03BF60A882879EEC949D72CF5C7ADD776E10C669B619C46E73AD34467EB869D41BF1548D1CB6EAFFC560632410B974365AF13535D114D0B4D9908870ED1A144FAE647D188AB17285030C2B0AC4",
    "00001047D2E98A8DDDA4F8B2515003805C5E93685DC0887D370DFC7776476116FD066F914542BA419CD446900AFA3CA5CC751BA077A3E40F3C473D097FA0AB52047D79569BE1DB7905AD26F80596FFAC7F4EC82FBC99767DB355008813E7590C",
);

/// The p751 field modulus.
pub fn p751_modulus() -> U768 {
    U768::from_be_hex(P751_HEX)
}

/// Exponent of the chosen torsion component: 2^372 or 3^239.
pub fn p751_exponent(prime: SubgroupPrime) -> usize {
    match prime {
        SubgroupPrime::Two => 372,
        SubgroupPrime::Three => 239,
    }
}

/// The fixed pairing generator of the chosen torsion component.
pub fn p751_pairing_generator(prime: SubgroupPrime) -> Fp2P751 {
    let field = DynResidueParams::new(&p751_modulus());
    let (c0, c1) = match prime {
        SubgroupPrime::Two => TWO_TORSION_GENERATOR,
        SubgroupPrime::Three => THREE_TORSION_GENERATOR,
    };
    Fp2::new(field, &Uint::from_be_hex(c0), &Uint::from_be_hex(c1))
}

/// Ready-to-solve context for discrete logs relative to the p751 pairing
/// generator of the chosen torsion component, with window width `window`.
pub fn p751_solver(
    prime: SubgroupPrime,
    window: usize,
) -> Result<PohligHellman<{ U768::LIMBS }>, DlogError> {
    let parameters = SubgroupParameters::new(
        prime,
        p751_exponent(prime),
        window,
        &p751_modulus(),
    )?;
    let invg = p751_pairing_generator(prime).conjugate();
    PohligHellman::new(parameters, &invg)
}
