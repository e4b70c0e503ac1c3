use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// A quantity together with its monetary value.
///
/// Every calculator returns one of these; a category with no data is
/// `QtdValor::ZERO`, never an error. Arithmetic saturates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QtdValor {
    pub qtd: i64,
    pub valor: Decimal,
}

impl QtdValor {
    pub const ZERO: QtdValor = QtdValor {
        qtd: 0,
        valor: Decimal::ZERO,
    };

    pub fn new(qtd: i64, valor: Decimal) -> Self {
        Self { qtd, valor }
    }

    pub fn is_zero(&self) -> bool {
        self.qtd == 0 && self.valor.is_zero()
    }
}

impl Add for QtdValor {
    type Output = QtdValor;

    fn add(self, rhs: QtdValor) -> QtdValor {
        QtdValor {
            qtd: self.qtd.saturating_add(rhs.qtd),
            valor: self.valor.saturating_add(rhs.valor),
        }
    }
}

impl Sub for QtdValor {
    type Output = QtdValor;

    fn sub(self, rhs: QtdValor) -> QtdValor {
        QtdValor {
            qtd: self.qtd.saturating_sub(rhs.qtd),
            valor: self.valor.saturating_sub(rhs.valor),
        }
    }
}

impl AddAssign for QtdValor {
    fn add_assign(&mut self, rhs: QtdValor) {
        *self = *self + rhs;
    }
}

impl Sum for QtdValor {
    fn sum<I: Iterator<Item = QtdValor>>(iter: I) -> Self {
        iter.fold(QtdValor::ZERO, Add::add)
    }
}
