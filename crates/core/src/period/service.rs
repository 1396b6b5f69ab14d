//! The payroll period service facade and its collaborator traits.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::aggregate::{EmployeeBaseAmounts, EmployeeResult, PeriodAggregator, RateCard};
use crate::entry::{EmployeeProfile, EntryError, EntryFields, EntryStore, PayrollEntry};
use crate::lifecycle::{Capability, LifecycleError, LifecycleMachine, PeriodStatus, TransitionAction};
use crate::period::error::PeriodError;
use crate::period::types::{AuditEvent, PayrollPeriod, PeriodSnapshot, PeriodSummary};
use paycycle_shared::types::{
    AuditStamp, EmployeeId, PageRequest, PageResponse, PeriodId, TenantId, UserId,
};

/// Persistence collaborator for period aggregates.
///
/// Implementations must make `insert` and `commit_transition` atomic:
/// either the whole aggregate write lands or nothing does. `insert` is
/// also responsible for enforcing the one-non-retired-period-per-
/// (tenant, month, year) invariant under concurrent creation.
pub trait PeriodRepository: Send + Sync {
    /// Persist a new period aggregate.
    fn insert(
        &self,
        snapshot: &PeriodSnapshot,
    ) -> impl Future<Output = Result<(), PeriodError>> + Send;

    /// Fetch a period aggregate by ID.
    fn fetch(
        &self,
        id: PeriodId,
    ) -> impl Future<Output = Result<Option<PeriodSnapshot>, PeriodError>> + Send;

    /// Find the non-retired period for (tenant, month, year).
    fn find_active(
        &self,
        tenant_id: TenantId,
        month: u32,
        year: i32,
    ) -> impl Future<Output = Result<Option<PeriodId>, PeriodError>> + Send;

    /// List period summaries for a tenant, most recent first.
    fn list(
        &self,
        tenant_id: TenantId,
    ) -> impl Future<Output = Result<Vec<PeriodSummary>, PeriodError>> + Send;

    /// Upsert one entry row together with the period's updated stamp.
    fn store_entry(
        &self,
        period: &PayrollPeriod,
        entry: &PayrollEntry,
    ) -> impl Future<Output = Result<(), PeriodError>> + Send;

    /// Delete one entry row together with the period's updated stamp.
    fn delete_entry(
        &self,
        period: &PayrollPeriod,
        employee_id: EmployeeId,
    ) -> impl Future<Output = Result<(), PeriodError>> + Send;

    /// Atomically persist a transition: status, stamps, totals, results,
    /// and the audit record.
    fn commit_transition(
        &self,
        period: &PayrollPeriod,
        results: &[EmployeeResult],
        audit: &AuditEvent,
    ) -> impl Future<Output = Result<(), PeriodError>> + Send;

    /// Persist period-level fields (notes, retirement).
    fn update_period(
        &self,
        period: &PayrollPeriod,
    ) -> impl Future<Output = Result<(), PeriodError>> + Send;
}

/// Identity collaborator: resolves employee references.
pub trait IdentityDirectory: Send + Sync {
    /// Resolve an employee to a profile, or None if unknown.
    fn resolve_employee(
        &self,
        id: EmployeeId,
    ) -> impl Future<Output = Result<Option<EmployeeProfile>, PeriodError>> + Send;
}

/// Compensation collaborator: supplies per-employee base gross and tax
/// withholdings for a reference month.
pub trait CompensationSource: Send + Sync {
    /// Base amounts for the given employees; employees without amounts
    /// are simply absent from the returned map.
    fn base_amounts(
        &self,
        tenant_id: TenantId,
        month: u32,
        year: i32,
        employees: &[EmployeeId],
    ) -> impl Future<Output = Result<HashMap<EmployeeId, EmployeeBaseAmounts>, PeriodError>> + Send;
}

/// Authorization collaborator: boolean capability checks.
pub trait Authorizer: Send + Sync {
    /// Whether the actor holds the capability for this period.
    fn allows(
        &self,
        actor: UserId,
        capability: Capability,
        period: &PayrollPeriod,
    ) -> impl Future<Output = Result<bool, PeriodError>> + Send;
}

/// The period service facade.
///
/// Serializes all mutating operations per period while unrelated periods
/// and reads proceed concurrently. Collaborator calls (identity,
/// authorization, compensation) happen outside the exclusive section;
/// only the fetch-validate-commit sequence runs inside it, so a slow
/// external call never blocks unrelated work on the same period.
pub struct PayrollService<R, D, C, Z> {
    repo: Arc<R>,
    directory: Arc<D>,
    compensation: Arc<C>,
    authorizer: Arc<Z>,
    rates: RateCard,
    locks: DashMap<PeriodId, Arc<Mutex<()>>>,
}

impl<R, D, C, Z> PayrollService<R, D, C, Z>
where
    R: PeriodRepository,
    D: IdentityDirectory,
    C: CompensationSource,
    Z: Authorizer,
{
    /// Create a new service.
    #[must_use]
    pub fn new(
        repo: Arc<R>,
        directory: Arc<D>,
        compensation: Arc<C>,
        authorizer: Arc<Z>,
        rates: RateCard,
    ) -> Self {
        Self {
            repo,
            directory,
            compensation,
            authorizer,
            rates,
            locks: DashMap::new(),
        }
    }

    /// The exclusive section for one period.
    fn period_lock(&self, id: PeriodId) -> Arc<Mutex<()>> {
        self.locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Fetch a mutable-intent snapshot, rejecting retired periods.
    async fn fetch_live(&self, id: PeriodId) -> Result<PeriodSnapshot, PeriodError> {
        let snapshot = self
            .repo
            .fetch(id)
            .await?
            .ok_or(PeriodError::PeriodNotFound(id))?;
        if snapshot.period.is_retired() {
            return Err(PeriodError::PeriodNotFound(id));
        }
        Ok(snapshot)
    }

    /// Create a new draft period for (tenant, month, year).
    ///
    /// # Errors
    ///
    /// * `PeriodError::InvalidMonth` for a month outside 1-12
    /// * `PeriodError::DuplicatePeriod` if a non-retired period exists
    pub async fn create_period(
        &self,
        tenant_id: TenantId,
        month: u32,
        year: i32,
        actor: UserId,
    ) -> Result<PayrollPeriod, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }
        if self
            .repo
            .find_active(tenant_id, month, year)
            .await?
            .is_some()
        {
            return Err(PeriodError::DuplicatePeriod { month, year });
        }

        let period = PayrollPeriod::new(tenant_id, month, year, actor);
        // The repository re-checks uniqueness inside its atomic insert.
        self.repo.insert(&PeriodSnapshot::empty(period.clone())).await?;

        info!(period = %period.id, month, year, "payroll period created");
        Ok(period)
    }

    /// Fetch a period with its entries materialized, ordered by employee
    /// display name.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::PeriodNotFound` for an unknown identifier.
    pub async fn get_period(&self, id: PeriodId) -> Result<PeriodSnapshot, PeriodError> {
        let mut snapshot = self
            .repo
            .fetch(id)
            .await?
            .ok_or(PeriodError::PeriodNotFound(id))?;
        snapshot.entries = EntryStore::ordered(&snapshot.entries);
        Ok(snapshot)
    }

    /// List a tenant's periods, most recent first.
    pub async fn list_periods(
        &self,
        tenant_id: TenantId,
        page: PageRequest,
    ) -> Result<PageResponse<PeriodSummary>, PeriodError> {
        let summaries = self.repo.list(tenant_id).await?;
        let total = summaries.len() as u64;
        let data = summaries
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .collect();
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Create or overwrite the entry for an employee in a draft period.
    ///
    /// # Errors
    ///
    /// * `PeriodError::PeriodNotFound` for an unknown or retired period
    /// * `EntryError::EmployeeNotFound` if the identity collaborator
    ///   cannot resolve the employee
    /// * `EntryError::PeriodNotEditable` outside Draft
    pub async fn upsert_entry(
        &self,
        period_id: PeriodId,
        employee_id: EmployeeId,
        fields: EntryFields,
        actor: UserId,
    ) -> Result<PayrollEntry, PeriodError> {
        // Identity resolution happens before the exclusive section.
        let profile = self
            .directory
            .resolve_employee(employee_id)
            .await?
            .ok_or(EntryError::EmployeeNotFound(employee_id))?;

        let lock = self.period_lock(period_id);
        let _guard = lock.lock().await;

        let mut snapshot = self.fetch_live(period_id).await?;
        let outcome = EntryStore::upsert(
            snapshot.period.status,
            &mut snapshot.entries,
            period_id,
            &profile,
            fields,
            actor,
        )?;

        if outcome.changed {
            snapshot.period.updated = AuditStamp::now(actor);
            self.repo
                .store_entry(&snapshot.period, &outcome.entry)
                .await?;
            debug!(period = %period_id, employee = %employee_id, "entry upserted");
        }
        Ok(outcome.entry)
    }

    /// Remove the entry for an employee from a draft period.
    ///
    /// # Errors
    ///
    /// * `PeriodError::PeriodNotFound` for an unknown or retired period
    /// * `EntryError::EntryNotFound` if no row exists for the employee
    /// * `EntryError::PeriodNotEditable` outside Draft
    pub async fn remove_entry(
        &self,
        period_id: PeriodId,
        employee_id: EmployeeId,
        actor: UserId,
    ) -> Result<(), PeriodError> {
        let lock = self.period_lock(period_id);
        let _guard = lock.lock().await;

        let mut snapshot = self.fetch_live(period_id).await?;
        EntryStore::remove(snapshot.period.status, &mut snapshot.entries, employee_id)?;

        snapshot.period.updated = AuditStamp::now(actor);
        self.repo
            .delete_entry(&snapshot.period, employee_id)
            .await?;
        debug!(period = %period_id, employee = %employee_id, "entry removed");
        Ok(())
    }

    /// Transition a period to the target status.
    ///
    /// Performs the authorization check and, for a calculation, the
    /// compensation prefetch outside the exclusive section, then
    /// re-validates against the fresh status inside it. A caller losing a
    /// concurrent race observes the post-transition state as an
    /// `InvalidTransition` from that state.
    ///
    /// # Errors
    ///
    /// * `PeriodError::PeriodNotFound` for an unknown or retired period
    /// * `PeriodError::PermissionDenied` if the authorizer refuses
    /// * `LifecycleError::InvalidTransition` / `NoEntries` from the machine
    /// * `AggregationError` kinds when calculating
    pub async fn transition(
        &self,
        period_id: PeriodId,
        target: PeriodStatus,
        actor: UserId,
    ) -> Result<PayrollPeriod, PeriodError> {
        let pre = self.fetch_live(period_id).await?;

        // Capability is a function of the (from, target) pair. If the
        // status changes before the lock is acquired, the pair either
        // stays the same (same capability, already checked) or the plan
        // below rejects the transition.
        if let Some(capability) =
            LifecycleMachine::required_capability(pre.period.status, target)
        {
            self.check_capability(actor, capability, &pre.period).await?;
        }

        let base_amounts = if target == PeriodStatus::Calculated {
            Some(self.prefetch_base_amounts(&pre).await?)
        } else {
            None
        };

        let lock = self.period_lock(period_id);
        let _guard = lock.lock().await;

        let mut snapshot = self.fetch_live(period_id).await?;
        let action = LifecycleMachine::plan(
            snapshot.period.status,
            target,
            snapshot.entries.len(),
            actor,
        )?;

        let results = match &action {
            TransitionAction::Calculate { .. } => {
                // A Calculate action only comes out of a Calculated target,
                // so the prefetch above has populated the map. Entries that
                // raced in through an unlock since then surface as a
                // MissingBaseAmount, and the caller re-evaluates.
                let base_amounts = base_amounts.unwrap_or_default();
                let (totals, results) = PeriodAggregator::aggregate(
                    &snapshot.entries,
                    &base_amounts,
                    &self.rates,
                )?;
                snapshot.period.totals = Some(totals);
                results
            }
            TransitionAction::Unlock { .. } | TransitionAction::Reopen { .. } => Vec::new(),
            _ => snapshot.results.clone(),
        };

        self.commit(&mut snapshot, &action, results, actor).await?;
        Ok(snapshot.period)
    }

    /// Recompute totals from the current entry snapshot.
    ///
    /// Valid from Locked (first calculation), Calculated (recompute), and
    /// Approved (pre-payment correction followed by recompute). The
    /// intermediate hops all go through the lifecycle machine.
    ///
    /// # Errors
    ///
    /// * `PeriodError::PeriodNotFound` for an unknown or retired period
    /// * `LifecycleError::InvalidTransition` from any other status
    /// * `AggregationError` kinds, propagated unchanged
    pub async fn recalculate(
        &self,
        period_id: PeriodId,
        actor: UserId,
    ) -> Result<PayrollPeriod, PeriodError> {
        let pre = self.fetch_live(period_id).await?;
        if !matches!(
            pre.period.status,
            PeriodStatus::Locked | PeriodStatus::Calculated | PeriodStatus::Approved
        ) {
            return Err(LifecycleError::InvalidTransition {
                from: pre.period.status,
                to: PeriodStatus::Calculated,
            }
            .into());
        }
        let base_amounts = self.prefetch_base_amounts(&pre).await?;

        let lock = self.period_lock(period_id);
        let _guard = lock.lock().await;

        let mut snapshot = self.fetch_live(period_id).await?;
        // Walk the machine back to Locked, then calculate.
        if snapshot.period.status == PeriodStatus::Approved {
            let action = LifecycleMachine::correct(snapshot.period.status)?;
            snapshot.period.apply(&action);
        }
        if snapshot.period.status == PeriodStatus::Calculated {
            let action = LifecycleMachine::reopen(snapshot.period.status)?;
            snapshot.period.apply(&action);
        }
        let action = LifecycleMachine::calculate(snapshot.period.status)?;
        let (totals, results) =
            PeriodAggregator::aggregate(&snapshot.entries, &base_amounts, &self.rates)?;
        snapshot.period.totals = Some(totals);

        self.commit(&mut snapshot, &action, results, actor).await?;
        Ok(snapshot.period)
    }

    /// Retire a draft period, freeing its (tenant, month, year) slot.
    ///
    /// The whole aggregate is retired atomically; entries and results are
    /// never deleted piecemeal.
    ///
    /// # Errors
    ///
    /// * `PeriodError::PeriodNotFound` for an unknown or retired period
    /// * `PeriodError::NotRetirable` outside Draft
    pub async fn retire_period(
        &self,
        period_id: PeriodId,
        actor: UserId,
    ) -> Result<(), PeriodError> {
        let lock = self.period_lock(period_id);
        let _guard = lock.lock().await;

        let mut snapshot = self.fetch_live(period_id).await?;
        if snapshot.period.status != PeriodStatus::Draft {
            return Err(PeriodError::NotRetirable(snapshot.period.status));
        }

        let stamp = AuditStamp::now(actor);
        snapshot.period.retired = Some(stamp);
        snapshot.period.updated = stamp;
        self.repo.update_period(&snapshot.period).await?;
        info!(period = %period_id, "payroll period retired");
        Ok(())
    }

    /// Update the free-text notes of a draft period.
    ///
    /// # Errors
    ///
    /// * `PeriodError::PeriodNotFound` for an unknown or retired period
    /// * `EntryError::PeriodNotEditable` outside Draft
    pub async fn update_notes(
        &self,
        period_id: PeriodId,
        notes: Option<String>,
        actor: UserId,
    ) -> Result<PayrollPeriod, PeriodError> {
        let lock = self.period_lock(period_id);
        let _guard = lock.lock().await;

        let mut snapshot = self.fetch_live(period_id).await?;
        if !snapshot.period.status.is_editable() {
            return Err(EntryError::PeriodNotEditable(snapshot.period.status).into());
        }

        snapshot.period.notes = notes;
        snapshot.period.updated = AuditStamp::now(actor);
        self.repo.update_period(&snapshot.period).await?;
        Ok(snapshot.period)
    }

    /// Authorization check, performed outside the exclusive section.
    async fn check_capability(
        &self,
        actor: UserId,
        capability: Capability,
        period: &PayrollPeriod,
    ) -> Result<(), PeriodError> {
        if self.authorizer.allows(actor, capability, period).await? {
            Ok(())
        } else {
            Err(PeriodError::PermissionDenied { actor, capability })
        }
    }

    /// Compensation prefetch, performed outside the exclusive section.
    async fn prefetch_base_amounts(
        &self,
        snapshot: &PeriodSnapshot,
    ) -> Result<HashMap<EmployeeId, EmployeeBaseAmounts>, PeriodError> {
        let employees: Vec<EmployeeId> =
            snapshot.entries.iter().map(|e| e.employee_id).collect();
        self.compensation
            .base_amounts(
                snapshot.period.tenant_id,
                snapshot.period.month,
                snapshot.period.year,
                &employees,
            )
            .await
    }

    /// Apply the final action, stamp, persist atomically, and log.
    async fn commit(
        &self,
        snapshot: &mut PeriodSnapshot,
        action: &TransitionAction,
        results: Vec<EmployeeResult>,
        actor: UserId,
    ) -> Result<(), PeriodError> {
        snapshot.period.apply(action);
        let stamp = AuditStamp::now(actor);
        snapshot.period.updated = stamp;
        snapshot.results = results;

        let audit = AuditEvent {
            tenant_id: snapshot.period.tenant_id,
            period_id: snapshot.period.id,
            transition: action.kind().to_string(),
            actor,
            at: stamp.at,
        };
        self.repo
            .commit_transition(&snapshot.period, &snapshot.results, &audit)
            .await?;

        info!(
            period = %snapshot.period.id,
            transition = action.kind(),
            status = %snapshot.period.status,
            "payroll period transitioned"
        );
        Ok(())
    }
}
