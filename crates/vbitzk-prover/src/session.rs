//! Session orchestration
//!
//! Gates submits, runs the [`SimulationDriver`] and publishes the synthesized
//! result. Each accepted submit starts a new run generation; a [`RunTicket`]
//! from an older generation can never publish (last-submitted-wins).

use crate::clock::{Clock, Scheduler};
use crate::config::ProverConfig;
use crate::simulation::{RunOutcome, SimulationDriver, SimulationEvent, SimulationState, StepView};
use crate::synthesis::Synthesizer;
use rand::RngCore;
use tracing::{info, warn};
use vbitzk_runtime::{Identifier, Network, ProofResult, Result, VbitzkError};

/// Handle to one accepted submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTicket {
    run_id: u64,
    identifier: Identifier,
}

impl RunTicket {
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }
}

pub struct Session<S, R, C> {
    driver: SimulationDriver,
    synthesizer: Synthesizer,
    scheduler: S,
    rng: R,
    clock: C,
    network: Network,
    identifier: Option<Identifier>,
    result: Option<ProofResult>,
    run_id: u64,
}

impl<S, R, C> Session<S, R, C>
where
    S: Scheduler,
    R: RngCore,
    C: Clock,
{
    pub fn new(config: &ProverConfig, scheduler: S, rng: R, clock: C) -> Self {
        Self::with_parts(
            SimulationDriver::new(config.steps.clone(), config.timing),
            Synthesizer::new(config.dataset()),
            scheduler,
            rng,
            clock,
        )
    }

    pub fn with_parts(
        driver: SimulationDriver,
        synthesizer: Synthesizer,
        scheduler: S,
        rng: R,
        clock: C,
    ) -> Self {
        Self {
            driver,
            synthesizer,
            scheduler,
            rng,
            clock,
            network: Network::default(),
            identifier: None,
            result: None,
            run_id: 0,
        }
    }

    pub fn state(&self) -> SimulationState {
        self.driver.state()
    }

    pub fn is_running(&self) -> bool {
        self.driver.state().is_running()
    }

    pub fn current_step_index(&self) -> usize {
        self.driver.state().current_step_index(self.driver.steps().len())
    }

    pub fn result(&self) -> Option<&ProofResult> {
        self.result.as_ref()
    }

    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn step_views(&self) -> Vec<StepView> {
        self.driver.step_views()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Whether the submit control would be enabled for `input`
    pub fn can_submit(&self, input: &str) -> bool {
        !input.is_empty() && !self.is_running()
    }

    /// Changes the decorative network selection; locked while running
    pub fn set_network(&mut self, network: Network) -> Result<()> {
        if self.is_running() {
            return Err(VbitzkError::ConcurrentSubmitRejected);
        }
        self.network = network;
        Ok(())
    }

    /// Accepts a new identifier and starts a run
    ///
    /// Refusals leave the session exactly as it was.
    pub fn submit(&mut self, input: &str) -> Result<RunTicket> {
        if self.is_running() {
            warn!(run_id = self.run_id, "submit rejected while a run is in flight");
            return Err(VbitzkError::ConcurrentSubmitRejected);
        }
        let identifier = Identifier::parse(input)?;

        self.result = None;
        self.run_id += 1;
        self.identifier = Some(identifier.clone());
        self.driver.start();

        info!(run_id = self.run_id, identifier = %identifier, network = %self.network, "proof run started");
        Ok(RunTicket { run_id: self.run_id, identifier })
    }

    /// Abandons any in-flight run and clears the screen state
    pub fn reset(&mut self) {
        if self.is_running() {
            info!(run_id = self.run_id, "in-flight run abandoned");
        }
        self.run_id += 1;
        self.driver.abandon();
        self.identifier = None;
        self.result = None;
    }

    fn check_ticket(&self, ticket: &RunTicket) -> Result<()> {
        if ticket.run_id != self.run_id {
            warn!(ticket = ticket.run_id, current = self.run_id, "stale run ticket ignored");
            return Err(VbitzkError::SupersededRun { ticket: ticket.run_id, current: self.run_id });
        }
        Ok(())
    }

    fn publish(&mut self, ticket: &RunTicket) {
        let result = self.synthesizer.synthesize(&ticket.identifier, &mut self.rng, &self.clock);
        info!(
            run_id = ticket.run_id,
            elapsed_ms = self.driver.elapsed().as_millis() as u64,
            nesting_depth = result.nesting_depth,
            proving_time_ms = result.proving_time_ms,
            "proof result published"
        );
        self.result = Some(result);
    }

    /// Moves the run one step forward, publishing the result on completion
    ///
    /// Returns `None` once the run has already finished.
    pub fn advance(&mut self, ticket: &RunTicket) -> Result<Option<SimulationEvent>> {
        self.check_ticket(ticket)?;

        let event = self.driver.advance(&mut self.scheduler, &mut self.rng);
        if let Some(SimulationEvent::Completed { .. }) = &event {
            self.publish(ticket);
        }
        Ok(event)
    }

    /// Drives the run until it completes or `cancelled` reports true
    ///
    /// The observer first sees the step that is active when the call begins.
    /// A cancelled run is reset like [`Session::reset`]: nothing is published
    /// and `ticket` goes stale. Returns `None` in that case.
    pub fn run_until<K, F>(
        &mut self,
        ticket: &RunTicket,
        cancelled: K,
        observer: F,
    ) -> Result<Option<&ProofResult>>
    where
        K: FnMut() -> bool,
        F: FnMut(&SimulationEvent),
    {
        self.check_ticket(ticket)?;
        match self.driver.run(&mut self.scheduler, &mut self.rng, cancelled, observer) {
            RunOutcome::Cancelled => {
                info!(run_id = ticket.run_id, "run cancelled");
                self.reset();
                Ok(None)
            }
            RunOutcome::Completed => {
                if self.result.is_none() {
                    self.publish(ticket);
                }
                Ok(self.result.as_ref())
            }
        }
    }

    /// Drives the run to completion and returns the published result
    ///
    /// The observer first sees the step that is active when the call begins.
    pub fn run<F>(&mut self, ticket: &RunTicket, observer: F) -> Result<&ProofResult>
    where
        F: FnMut(&SimulationEvent),
    {
        self.run_until(ticket, || false, observer)?
            .ok_or_else(|| VbitzkError::other("run finished without publishing a result"))
    }

    /// Submit followed by a full run
    pub fn prove<F>(&mut self, input: &str, observer: F) -> Result<&ProofResult>
    where
        F: FnMut(&SimulationEvent),
    {
        let ticket = self.submit(input)?;
        self.run(&ticket, observer)
    }
}
