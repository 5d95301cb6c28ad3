use agora_multimult::{naive_msm, MultiMult};
use bigint::U256;
use bls::{G1Projective, G2Projective, Scalar};
use group::Group;
use rand_chacha::ChaChaRng;
use rand_core::{RngCore, SeedableRng};

fn get_test_rng() -> ChaChaRng {
    ChaChaRng::from_seed([42; 32])
}

// 248-bit weights are below the BLS12-381 scalar field modulus
fn random_weight(rng: &mut ChaChaRng) -> (U256, Scalar) {
    let mut be_bytes = [0_u8; 32];
    rng.fill_bytes(&mut be_bytes[1..]);
    let mut le_bytes = be_bytes;
    le_bytes.reverse();
    // NOTE unwrap is fine here because the top byte is zero
    let scalar = Scalar::from_bytes(&le_bytes).unwrap();
    (U256::from_be_slice(&be_bytes), scalar)
}

#[test]
fn g1_matches_native_multiplication() {
    let mut rng = get_test_rng();
    let n = 16;

    let mut multimult = MultiMult::<G1Projective, U256>::new();
    let mut expected = G1Projective::identity();
    for _ in 0..n {
        let point = G1Projective::random(&mut rng);
        let (weight, scalar) = random_weight(&mut rng);
        expected += point * scalar;
        multimult.insert(point, weight);
    }

    assert_eq!(multimult.evaluate(), expected);
}

#[test]
fn g2_matches_naive_msm() {
    let mut rng = get_test_rng();
    let n = 8;

    let points = (0..n)
        .map(|_| G2Projective::random(&mut rng))
        .collect::<Vec<G2Projective>>();
    let weights = (0..n)
        .map(|_| random_weight(&mut rng).0)
        .collect::<Vec<U256>>();

    let multimult = MultiMult::from_slices(&points, &weights).unwrap();
    assert_eq!(multimult.evaluate(), naive_msm(&points, &weights).unwrap());
}
