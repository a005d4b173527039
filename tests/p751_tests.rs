//! Solve tests at the production SIKEp751 scale, using the fixed pairing
//! generators. These run the full 372- and 239-digit traversals, so the
//! exponent set is kept small; dense coverage lives in the toy-field tests.

use crypto_bigint::{Uint, U768};

use cyclotomic_dlog::pohlig_hellman::presets::{p751_pairing_generator, p751_solver};
use cyclotomic_dlog::{DlogError, SubgroupPrime};

const LIMBS: usize = U768::LIMBS;

/// 2^372 − 1
const K2_MAX: &str = "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF";
/// (2^372 − 1)/3
const K2_MID: &str = "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000555555555555555555555555555555555555555555555555555555555555555555555555555555555555555555555";
/// 3^239 − 1
const K3_MAX: &str = "00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000006FE5D541F71C0E12909F97BADC668562B5045CB25748084E9867D6EBE876DA959B1A13F7CC76E3EC968549F878A8EEA";
/// (3^239 − 1)/2
const K3_MID: &str = "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000037F2EAA0FB8E0709484FCBDD6E3342B15A822E592BA404274C33EB75F43B6D4ACD8D09FBE63B71F64B42A4FC3C54775";

fn check_roundtrips(prime: SubgroupPrime, window: usize, exponents: &[Uint<LIMBS>]) {
    let solver = p751_solver(prime, window).expect("preset config is valid");
    let g = p751_pairing_generator(prime);
    for k in exponents {
        let target = g.pow_vartime(k);
        assert_eq!(
            solver.solve(&target).expect("target lies in the subgroup"),
            *k
        );
    }
}

#[test]
fn two_torsion_window_4() {
    check_roundtrips(
        SubgroupPrime::Two,
        4,
        &[
            Uint::ZERO,
            Uint::ONE,
            Uint::from_u64(0xDEADBEEF),
            Uint::from_be_hex(K2_MID),
            Uint::from_be_hex(K2_MAX),
        ],
    );
}

#[test]
fn three_torsion_window_3() {
    check_roundtrips(
        SubgroupPrime::Three,
        3,
        &[
            Uint::ZERO,
            Uint::ONE,
            Uint::from_u64(0xDEADBEEF),
            Uint::from_be_hex(K3_MID),
            Uint::from_be_hex(K3_MAX),
        ],
    );
}

#[test]
fn three_torsion_window_1() {
    // One digit per trit; 239 mod 1 = 0 keeps the uniform tables.
    check_roundtrips(
        SubgroupPrime::Three,
        1,
        &[Uint::ONE, Uint::from_be_hex(K3_MID)],
    );
}

#[test]
fn solvers_with_different_windows_agree() {
    let a = p751_solver(SubgroupPrime::Three, 3).unwrap();
    let b = p751_solver(SubgroupPrime::Three, 4).unwrap(); // 239 mod 4 = 3, split tables
    let g = p751_pairing_generator(SubgroupPrime::Three);
    let k: Uint<LIMBS> = Uint::from_be_hex(K3_MID);
    let target = g.pow_vartime(&k);
    assert_eq!(a.solve(&target).unwrap(), b.solve(&target).unwrap());
}

#[test]
fn cross_torsion_input_is_rejected() {
    let solver = p751_solver(SubgroupPrime::Two, 4).unwrap();
    let g3 = p751_pairing_generator(SubgroupPrime::Three);
    assert!(matches!(
        solver.solve(&g3),
        Err(DlogError::TableMiss { .. })
    ));
}
