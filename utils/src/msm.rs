use ark_ec::{scalar_mul::fixed_base::FixedBase, CurveGroup};
use ark_ff::PrimeField;
use ark_std::vec::Vec;

/// Precomputed multiples of a fixed generator, used when the same point is raised to many
/// exponents, e.g. a generator to every key share.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct WindowTable<G: CurveGroup> {
    scalar_size: usize,
    window_size: usize,
    outerc: usize,
    table: Vec<Vec<G::Affine>>,
}

impl<G: CurveGroup> WindowTable<G> {
    /// Create new table for `group_elem`. `num_multiplications` is the expected number of
    /// multiplications and only affects performance.
    pub fn new(num_multiplications: usize, group_elem: G) -> Self {
        let scalar_size = G::ScalarField::MODULUS_BIT_SIZE as usize;
        let window_size = FixedBase::get_mul_window_size(num_multiplications);
        let outerc = (scalar_size + window_size - 1) / window_size;
        let table = FixedBase::get_window_table(scalar_size, window_size, group_elem);
        Self {
            scalar_size,
            window_size,
            outerc,
            table,
        }
    }

    /// Multiply with a single scalar
    pub fn multiply(&self, element: &G::ScalarField) -> G {
        FixedBase::windowed_mul(self.outerc, self.window_size, &self.table, element)
    }

    /// Multiply with many scalars
    pub fn multiply_many(&self, elements: &[G::ScalarField]) -> Vec<G> {
        FixedBase::msm(self.scalar_size, self.window_size, &self.table, elements)
    }

    /// Same as `multiply_many` but returns affine points, normalized in one batch.
    pub fn multiply_many_affine(&self, elements: &[G::ScalarField]) -> Vec<G::Affine> {
        G::normalize_batch(&self.multiply_many(elements))
    }
}

/// The same group element is multiplied by each in `elements` using a window table
pub fn multiply_field_elems_with_same_group_elem<G: CurveGroup>(
    group_elem: G,
    elements: &[G::ScalarField],
) -> Vec<G::Affine> {
    WindowTable::new(elements.len(), group_elem).multiply_many_affine(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::{Fr, G1Projective, G2Projective};
    use ark_ec::Group;
    use ark_std::{
        rand::{rngs::StdRng, SeedableRng},
        UniformRand,
    };

    #[test]
    fn matches_plain_multiplication() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let scalars = (0..10).map(|_| Fr::rand(&mut rng)).collect::<Vec<_>>();

        let g1 = G1Projective::rand(&mut rng);
        let table = WindowTable::new(scalars.len(), g1);
        for (s, p) in scalars.iter().zip(table.multiply_many(&scalars)) {
            assert_eq!(g1 * s, p);
            assert_eq!(table.multiply(s), p);
        }

        let g2 = G2Projective::generator();
        let affine = multiply_field_elems_with_same_group_elem(g2, &scalars);
        for (s, p) in scalars.iter().zip(affine) {
            assert_eq!((g2 * s).into_affine(), p);
        }
    }
}
