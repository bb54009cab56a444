//! Session store
//!
//! Authoritative in-memory record of one draw session. Lifecycle:
//! `initialize` (once) → optional `resume` → mutations → optional `reset`.
//!
//! Mutations are serialized by an async mutex held across the whole
//! compute-persist-publish sequence. Each mutation works on a copy of the
//! published state and only publishes it after the record write succeeded, so a
//! failed or timed-out write leaves the session exactly as it was. Reads only
//! touch the published state and never wait on storage.

use crate::export::{build_export_matrix, ExportMatrix};
use crate::gateway::RecordGateway;
use crate::pool::derive_eligible_pool;
use crate::shuffle::shuffle;
use draw_core::{
    DrawConfig, DrawError, DuplicateFlag, DuplicateReason, Participant, ParticipantId, PrizeTier,
    PrizeType, RandomEffects, RecordNames, Result, StorageEffects, WinnerLedger,
};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Published state of an initialized session
#[derive(Debug, Clone)]
pub struct SessionState {
    roster: Arc<[Participant]>,
    roster_ids: Arc<HashSet<ParticipantId>>,
    ledger: WinnerLedger,
    absentees: Vec<Participant>,
    pool: Vec<Participant>,
    flags: Vec<DuplicateFlag>,
}

impl SessionState {
    fn new(roster: Vec<Participant>) -> Self {
        let roster_ids = roster.iter().map(|p| p.id.clone()).collect();
        Self {
            pool: roster.clone(),
            roster: roster.into(),
            roster_ids: Arc::new(roster_ids),
            ledger: WinnerLedger::new(),
            absentees: Vec::new(),
            flags: Vec::new(),
        }
    }

    fn cleared(&self) -> Self {
        Self {
            roster: Arc::clone(&self.roster),
            roster_ids: Arc::clone(&self.roster_ids),
            ledger: WinnerLedger::new(),
            absentees: Vec::new(),
            pool: self.roster.to_vec(),
            flags: Vec::new(),
        }
    }

    fn recompute_pool(&mut self) {
        self.pool = derive_eligible_pool(&self.roster, &self.ledger, &self.absentees);
    }

    /// Flag every participant of `batch` that is already excluded, repeated, or unknown.
    fn audit(&self, batch: &[Participant], prize_type: Option<PrizeType>) -> Vec<DuplicateFlag> {
        let winners = self.ledger.winner_ids();
        let absent: HashSet<&ParticipantId> = self.absentees.iter().map(|p| &p.id).collect();
        let mut in_batch = HashSet::with_capacity(batch.len());

        batch
            .iter()
            .filter_map(|p| {
                let reason = if winners.contains(&p.id) {
                    DuplicateReason::AlreadyWon
                } else if absent.contains(&p.id) {
                    DuplicateReason::AlreadyAbsent
                } else if !in_batch.insert(&p.id) {
                    DuplicateReason::RepeatedInPayload
                } else if !self.roster_ids.contains(&p.id) {
                    DuplicateReason::NotOnRoster
                } else {
                    return None;
                };
                Some(DuplicateFlag {
                    participant_id: p.id.clone(),
                    reason,
                    prize_type,
                })
            })
            .collect()
    }

    /// Every participant, in the order fixed at initialization
    pub fn roster(&self) -> &[Participant] {
        &self.roster
    }

    /// Winners per prize type
    pub fn ledger(&self) -> &WinnerLedger {
        &self.ledger
    }

    /// Participants marked absent, in recording order
    pub fn absentees(&self) -> &[Participant] {
        &self.absentees
    }

    /// Roster minus winners and absentees
    pub fn eligible_pool(&self) -> &[Participant] {
        &self.pool
    }

    /// Data-quality flags raised since initialization or the last reset
    pub fn duplicate_flags(&self) -> &[DuplicateFlag] {
        &self.flags
    }
}

/// Outcome of a successful mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationReceipt {
    /// Participants appended by this mutation
    pub recorded: usize,
    /// Size of the eligible pool after the mutation
    pub eligible: usize,
    /// Data-quality flags raised by this mutation
    pub flags: Vec<DuplicateFlag>,
}

/// The draw session state machine
pub struct SessionStore {
    catalog: Vec<PrizeTier>,
    records: RecordNames,
    gateway: RecordGateway,
    random: Arc<dyn RandomEffects>,
    state: RwLock<Option<SessionState>>,
    mutation: Mutex<()>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("catalog", &self.catalog)
            .field("records", &self.records)
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create an uninitialized store
    pub fn new(
        catalog: Vec<PrizeTier>,
        records: RecordNames,
        gateway: RecordGateway,
        random: Arc<dyn RandomEffects>,
    ) -> Self {
        Self {
            catalog,
            records,
            gateway,
            random,
            state: RwLock::new(None),
            mutation: Mutex::new(()),
        }
    }

    /// Create an uninitialized store from event configuration
    pub fn from_config(
        config: &DrawConfig,
        storage: Arc<dyn StorageEffects>,
        random: Arc<dyn RandomEffects>,
    ) -> Self {
        let gateway = RecordGateway::new(storage, config.session.persist_timeout());
        Self::new(
            config.prizes.clone(),
            config.session.records.clone(),
            gateway,
            random,
        )
    }

    /// Shuffle `roster` once and start an empty session over it.
    ///
    /// An empty roster yields an empty pool. Calling this twice, or with
    /// duplicate participant ids, is a validation error.
    pub async fn initialize(&self, mut roster: Vec<Participant>) -> Result<()> {
        let _guard = self.mutation.lock().await;
        if self.is_initialized() {
            return Err(DrawError::validation("draw session is already initialized"));
        }
        {
            let mut seen = HashSet::with_capacity(roster.len());
            if let Some(dup) = roster.iter().find(|p| !seen.insert(&p.id)) {
                return Err(DrawError::validation(format!(
                    "roster id {} appears more than once",
                    dup.id
                )));
            }
        }

        shuffle(&*self.random, &mut roster).await;
        let participants = roster.len();
        *self.state.write() = Some(SessionState::new(roster));
        tracing::info!(participants, "draw session initialized");
        Ok(())
    }

    /// Reload the persisted winners and absentees into an initialized session.
    ///
    /// Missing records load as empty. The loaded records are audited tier by
    /// tier, then absentees, so duplicates raise the same flags they would
    /// have raised when first recorded. Ledger tiers missing from the catalog
    /// are kept but logged, since export skips them.
    pub async fn resume(&self) -> Result<MutationReceipt> {
        let _guard = self.mutation.lock().await;
        let mut next = self.current()?.cleared();
        let ledger: WinnerLedger = self.gateway.load(&self.records.winners).await?;
        let absentees: Vec<Participant> = self.gateway.load(&self.records.absentees).await?;

        let mut flags = Vec::new();
        for (prize_type, winners) in ledger.iter() {
            if self.tier(prize_type).is_none() {
                tracing::warn!(
                    %prize_type,
                    winners = winners.len(),
                    "persisted tier is not in the catalog and will not be exported"
                );
            }
            flags.extend(next.audit(winners, Some(prize_type)));
            next.ledger.append(prize_type, winners.iter().cloned());
        }
        flags.extend(next.audit(&absentees, None));
        next.absentees = absentees;

        let recorded = next.ledger.len() + next.absentees.len();
        let receipt = self.publish(next, flags, recorded);
        tracing::info!(
            recorded,
            eligible = receipt.eligible,
            "draw session resumed from records"
        );
        Ok(receipt)
    }

    /// Append `winners` to the ledger entry of `prize_type` and persist the ledger.
    ///
    /// Winners that were already excluded are recorded anyway and reported as
    /// duplicate flags.
    pub async fn record_winners(
        &self,
        prize_type: PrizeType,
        winners: Vec<Participant>,
    ) -> Result<MutationReceipt> {
        let _guard = self.mutation.lock().await;
        let mut next = self.current()?;
        if self.tier(prize_type).is_none() {
            return Err(DrawError::validation(format!(
                "prize type {prize_type} is not in the catalog"
            )));
        }
        if winners.is_empty() {
            return Err(DrawError::validation("no winners supplied"));
        }

        let flags = next.audit(&winners, Some(prize_type));
        let recorded = winners.len();
        let previous = next.ledger.clone();
        next.ledger.append(prize_type, winners);

        if let Err(err) = self
            .persist(&self.records.winners, next.ledger(), &previous)
            .await
        {
            tracing::error!(%prize_type, error = %err, "winners not persisted, session unchanged");
            return Err(err);
        }

        let receipt = self.publish(next, flags, recorded);
        tracing::info!(%prize_type, recorded, eligible = receipt.eligible, "winners recorded");
        Ok(receipt)
    }

    /// Append `participants` to the absentee list and persist it.
    pub async fn record_absent(&self, participants: Vec<Participant>) -> Result<MutationReceipt> {
        let _guard = self.mutation.lock().await;
        let mut next = self.current()?;
        if participants.is_empty() {
            return Err(DrawError::validation("no absent participants supplied"));
        }

        let flags = next.audit(&participants, None);
        let recorded = participants.len();
        let previous = next.absentees.clone();
        next.absentees.extend(participants);

        if let Err(err) = self
            .persist(&self.records.absentees, next.absentees(), previous.as_slice())
            .await
        {
            tracing::error!(error = %err, "absentees not persisted, session unchanged");
            return Err(err);
        }

        let receipt = self.publish(next, flags, recorded);
        tracing::info!(recorded, eligible = receipt.eligible, "absentees recorded");
        Ok(receipt)
    }

    /// Clear winners, absentees and flags, persisting both records as empty.
    ///
    /// If the absentee write fails after the winner record was already emptied,
    /// the previous winner record is written back before the error is returned.
    pub async fn reset(&self) -> Result<MutationReceipt> {
        let _guard = self.mutation.lock().await;
        let current = self.current()?;
        let next = current.cleared();

        if let Err(err) = self
            .persist(&self.records.winners, next.ledger(), current.ledger())
            .await
        {
            tracing::error!(error = %err, "reset failed writing winners, session unchanged");
            return Err(err);
        }
        if let Err(err) = self
            .persist(&self.records.absentees, next.absentees(), current.absentees())
            .await
        {
            tracing::error!(error = %err, "reset failed writing absentees, session unchanged");
            self.restore(&self.records.winners, current.ledger()).await;
            return Err(err);
        }

        let receipt = self.publish(next, Vec::new(), 0);
        tracing::info!(eligible = receipt.eligible, "draw session reset");
        Ok(receipt)
    }

    /// Save `data` as record `name`, writing `previous` back if the save fails.
    ///
    /// A write that timed out may still land after the gateway gave up on it,
    /// so the record is put back to match the unchanged session. The rewrite
    /// is best effort: if storage is still unresponsive it can fail as well,
    /// and a late write could in principle land after it.
    async fn persist<T: Serialize + ?Sized>(
        &self,
        name: &str,
        data: &T,
        previous: &T,
    ) -> Result<()> {
        let result = self.gateway.save(name, data).await;
        if result.is_err() {
            self.restore(name, previous).await;
        }
        result
    }

    async fn restore<T: Serialize + ?Sized>(&self, name: &str, previous: &T) {
        if let Err(err) = self.gateway.save(name, previous).await {
            tracing::error!(record = name, error = %err, "could not restore record after failed write");
        }
    }

    fn tier(&self, prize_type: PrizeType) -> Option<&PrizeTier> {
        self.catalog.iter().find(|tier| tier.prize_type == prize_type)
    }

    fn publish(
        &self,
        mut next: SessionState,
        flags: Vec<DuplicateFlag>,
        recorded: usize,
    ) -> MutationReceipt {
        for flag in &flags {
            tracing::warn!(
                participant = %flag.participant_id,
                reason = ?flag.reason,
                prize_type = ?flag.prize_type.map(PrizeType::value),
                "suspicious participant recorded"
            );
        }
        next.flags.extend(flags.iter().cloned());
        next.recompute_pool();
        let receipt = MutationReceipt {
            recorded,
            eligible: next.pool.len(),
            flags,
        };
        *self.state.write() = Some(next);
        receipt
    }

    fn current(&self) -> Result<SessionState> {
        self.read(SessionState::clone)
    }

    fn read<T>(&self, f: impl FnOnce(&SessionState) -> T) -> Result<T> {
        self.state
            .read()
            .as_ref()
            .map(f)
            .ok_or_else(DrawError::not_initialized)
    }

    /// Whether `initialize` has completed
    pub fn is_initialized(&self) -> bool {
        self.state.read().is_some()
    }

    /// Prize catalog in display order
    pub fn catalog(&self) -> &[PrizeTier] {
        &self.catalog
    }

    /// Record gateway used for persistence
    pub fn gateway(&self) -> &RecordGateway {
        &self.gateway
    }

    /// Record names used for persistence
    pub fn records(&self) -> &RecordNames {
        &self.records
    }

    /// Consistent copy of the whole published state
    pub fn snapshot(&self) -> Result<SessionState> {
        self.current()
    }

    /// Current eligible pool
    pub fn eligible_pool(&self) -> Result<Vec<Participant>> {
        self.read(|s| s.pool.clone())
    }

    /// Current winner ledger
    pub fn winner_ledger(&self) -> Result<WinnerLedger> {
        self.read(|s| s.ledger.clone())
    }

    /// Current absentee list
    pub fn absentees(&self) -> Result<Vec<Participant>> {
        self.read(|s| s.absentees.clone())
    }

    /// The shuffled roster
    pub fn roster(&self) -> Result<Vec<Participant>> {
        self.read(|s| s.roster.to_vec())
    }

    /// Flags raised since initialization or the last reset
    pub fn duplicate_flags(&self) -> Result<Vec<DuplicateFlag>> {
        self.read(|s| s.flags.clone())
    }

    /// Export matrix for the current ledger
    pub fn export_matrix(&self) -> Result<ExportMatrix> {
        self.read(|s| build_export_matrix(&self.catalog, &s.ledger))
    }
}
