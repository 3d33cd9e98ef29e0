use soroban_sdk::{log, Env, Symbol};

use crate::error::Error;
use crate::events::{MinInvestorsWarningEvent, StageChangedEvent};
use crate::storage::{DataKey, Stage, Storage};

pub struct Lifecycle;

impl Lifecycle {
    pub fn current(env: &Env) -> Stage {
        env.storage()
            .instance()
            .get(&DataKey::Stage)
            .unwrap_or(Stage::Setup)
    }

    /// Fails with `WrongStage` unless the offering is in one of `allowed`
    pub fn require_stage(env: &Env, allowed: &[Stage]) -> Result<Stage, Error> {
        let stage = Self::current(env);
        if allowed.contains(&stage) {
            Ok(stage)
        } else {
            log!(env, "operation not legal in stage", stage as u32);
            Err(Error::WrongStage)
        }
    }

    /// Move one step forward to `to`. The caller has already authorized the owner.
    pub fn advance(env: &Env, to: Stage) -> Result<(), Error> {
        let from = Self::current(env);
        if Self::predecessor(to) != Some(from) {
            log!(env, "rejected stage transition", from as u32, to as u32);
            return Err(Error::InvalidStageTransition);
        }

        match to {
            Stage::Prelaunch => {
                Storage::main_params(env)?;
                Storage::sto_flags(env)?;
                Storage::sto_params(env)?;
            }
            Stage::Lock => {
                let params = Storage::sto_params(env)?;
                let investor_count = Storage::investor_count(env);
                if investor_count < params.min_investors {
                    env.events().publish(
                        (Symbol::new(env, "min_inv"),),
                        MinInvestorsWarningEvent {
                            investor_count,
                            min_investors: params.min_investors,
                        },
                    );
                }
            }
            _ => {}
        }

        env.storage().instance().set(&DataKey::Stage, &to);

        env.events().publish(
            (Symbol::new(env, "stage_changed"),),
            StageChangedEvent { from, to },
        );

        Ok(())
    }

    fn predecessor(stage: Stage) -> Option<Stage> {
        match stage {
            Stage::Setup => None,
            Stage::Prelaunch => Some(Stage::Setup),
            Stage::Presale => Some(Stage::Prelaunch),
            Stage::Sale => Some(Stage::Presale),
            Stage::Lock => Some(Stage::Sale),
            Stage::Market => Some(Stage::Lock),
        }
    }
}
