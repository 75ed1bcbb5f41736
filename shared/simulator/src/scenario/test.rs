use super::prelude::*;

/// Empty world with no walls. Tests populate it directly.
pub struct TestScenario {}

impl Scenario for TestScenario {
    fn name(&self) -> String {
        "test".into()
    }

    fn init(&mut self, _sim: &mut Simulation, _seed: u32) -> Result<(), Error> {
        Ok(())
    }
}
