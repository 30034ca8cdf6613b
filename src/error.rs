use thiserror::Error;

/// Errors raised at the arena's command boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArenaError {
    #[error("unknown command key code: {0}")]
    UnknownCommand(i32),
}

/// Parameter bundle errors
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("arena dimensions must be positive, got {x_dim}x{y_dim}")]
    NonPositiveDimension { x_dim: u32, y_dim: u32 },

    #[error("arena needs at least one robot")]
    NoRobots,

    #[error("{entity} radius must be positive, got {radius}")]
    NonPositiveRadius { entity: String, radius: f64 },

    #[error("{entity} collision delta must not be negative, got {delta}")]
    NegativeCollisionDelta { entity: String, delta: f64 },

    #[error("{entity} battery capacity must be positive, got {charge}")]
    NonPositiveBatteryCharge { entity: String, charge: f64 },

    #[error(
        "{entity} max speed must be positive and at least its start speed ({speed}), got {max_speed}"
    )]
    MaxSpeed {
        entity: String,
        speed: f64,
        max_speed: f64,
    },
}
