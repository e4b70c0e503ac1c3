use crate::errors::{AppError, AppResult};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Service periods an operator can record sales for.
///
/// The camelCase string form is the key used inside stored entries and in
/// the HTTP API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PeriodId {
    CafeDaManhaHospedes,
    CafeDaManhaAvulsos,
    AlmocoPrimeiroTurno,
    AlmocoSegundoTurno,
    Jantar,
    ItalianoAlmoco,
    ItalianoJantar,
    IndianoAlmoco,
    IndianoJantar,
    RoomService,
    Frigobar,
    Eventos,
}

impl PeriodId {
    pub const ALL: [PeriodId; 12] = [
        PeriodId::CafeDaManhaHospedes,
        PeriodId::CafeDaManhaAvulsos,
        PeriodId::AlmocoPrimeiroTurno,
        PeriodId::AlmocoSegundoTurno,
        PeriodId::Jantar,
        PeriodId::ItalianoAlmoco,
        PeriodId::ItalianoJantar,
        PeriodId::IndianoAlmoco,
        PeriodId::IndianoJantar,
        PeriodId::RoomService,
        PeriodId::Frigobar,
        PeriodId::Eventos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodId::CafeDaManhaHospedes => "cafeDaManhaHospedes",
            PeriodId::CafeDaManhaAvulsos => "cafeDaManhaAvulsos",
            PeriodId::AlmocoPrimeiroTurno => "almocoPrimeiroTurno",
            PeriodId::AlmocoSegundoTurno => "almocoSegundoTurno",
            PeriodId::Jantar => "jantar",
            PeriodId::ItalianoAlmoco => "italianoAlmoco",
            PeriodId::ItalianoJantar => "italianoJantar",
            PeriodId::IndianoAlmoco => "indianoAlmoco",
            PeriodId::IndianoJantar => "indianoJantar",
            PeriodId::RoomService => "roomService",
            PeriodId::Frigobar => "frigobar",
            PeriodId::Eventos => "eventos",
        }
    }

    /// Human readable label for tables and exports.
    pub fn label(&self) -> &'static str {
        match self {
            PeriodId::CafeDaManhaHospedes => "Café da manhã (hóspedes)",
            PeriodId::CafeDaManhaAvulsos => "Café da manhã (avulsos)",
            PeriodId::AlmocoPrimeiroTurno => "Almoço 1º turno",
            PeriodId::AlmocoSegundoTurno => "Almoço 2º turno",
            PeriodId::Jantar => "Jantar",
            PeriodId::ItalianoAlmoco => "Italiano almoço",
            PeriodId::ItalianoJantar => "Italiano jantar",
            PeriodId::IndianoAlmoco => "Indiano almoço",
            PeriodId::IndianoJantar => "Indiano jantar",
            PeriodId::RoomService => "Room service",
            PeriodId::Frigobar => "Frigobar",
            PeriodId::Eventos => "Eventos",
        }
    }

    pub fn is_events(&self) -> bool {
        matches!(self, PeriodId::Eventos)
    }
}

impl fmt::Display for PeriodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodId {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        let wanted = s.trim();
        PeriodId::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AppError::InvalidInput(format!("unknown period id '{wanted}'")))
    }
}
