//! In-memory collaborator implementations.
//!
//! Reference implementations backing the test suite and database-free
//! embeddings. Aggregate writes take one store-wide mutex, which makes
//! every repository operation atomic.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::aggregate::{EmployeeBaseAmounts, EmployeeResult};
use crate::entry::{EmployeeProfile, PayrollEntry};
use crate::lifecycle::Capability;
use crate::period::error::PeriodError;
use crate::period::service::{
    Authorizer, CompensationSource, IdentityDirectory, PeriodRepository,
};
use crate::period::types::{AuditEvent, PayrollPeriod, PeriodSnapshot, PeriodSummary};
use paycycle_shared::types::{EmployeeId, PeriodId, TenantId, UserId};

/// In-memory period repository.
#[derive(Default)]
pub struct InMemoryPeriodStore {
    periods: Mutex<HashMap<PeriodId, PeriodSnapshot>>,
    audit_log: Mutex<Vec<AuditEvent>>,
}

impl InMemoryPeriodStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded audit events, oldest first.
    #[must_use]
    pub fn audit_events(&self) -> Vec<AuditEvent> {
        self.audit_log.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }
}

impl PeriodRepository for InMemoryPeriodStore {
    async fn insert(&self, snapshot: &PeriodSnapshot) -> Result<(), PeriodError> {
        let mut periods = self.periods.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let period = &snapshot.period;
        let duplicate = periods.values().any(|existing| {
            existing.period.tenant_id == period.tenant_id
                && existing.period.month == period.month
                && existing.period.year == period.year
                && !existing.period.is_retired()
        });
        if duplicate {
            return Err(PeriodError::DuplicatePeriod {
                month: period.month,
                year: period.year,
            });
        }
        periods.insert(period.id, snapshot.clone());
        Ok(())
    }

    async fn fetch(&self, id: PeriodId) -> Result<Option<PeriodSnapshot>, PeriodError> {
        Ok(self.periods.lock().unwrap_or_else(std::sync::PoisonError::into_inner).get(&id).cloned())
    }

    async fn find_active(
        &self,
        tenant_id: TenantId,
        month: u32,
        year: i32,
    ) -> Result<Option<PeriodId>, PeriodError> {
        Ok(self
            .periods
            .lock()
            .unwrap()
            .values()
            .find(|s| {
                s.period.tenant_id == tenant_id
                    && s.period.month == month
                    && s.period.year == year
                    && !s.period.is_retired()
            })
            .map(|s| s.period.id))
    }

    async fn list(&self, tenant_id: TenantId) -> Result<Vec<PeriodSummary>, PeriodError> {
        let periods = self.periods.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut summaries: Vec<PeriodSummary> = periods
            .values()
            .filter(|s| s.period.tenant_id == tenant_id && !s.period.is_retired())
            .map(|s| PeriodSummary::from(&s.period))
            .collect();
        summaries.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));
        Ok(summaries)
    }

    async fn store_entry(
        &self,
        period: &PayrollPeriod,
        entry: &PayrollEntry,
    ) -> Result<(), PeriodError> {
        let mut periods = self.periods.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let snapshot = periods
            .get_mut(&period.id)
            .ok_or(PeriodError::PeriodNotFound(period.id))?;
        snapshot.period = period.clone();
        match snapshot
            .entries
            .iter_mut()
            .find(|e| e.employee_id == entry.employee_id)
        {
            Some(existing) => *existing = entry.clone(),
            None => snapshot.entries.push(entry.clone()),
        }
        Ok(())
    }

    async fn delete_entry(
        &self,
        period: &PayrollPeriod,
        employee_id: EmployeeId,
    ) -> Result<(), PeriodError> {
        let mut periods = self.periods.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let snapshot = periods
            .get_mut(&period.id)
            .ok_or(PeriodError::PeriodNotFound(period.id))?;
        snapshot.period = period.clone();
        snapshot.entries.retain(|e| e.employee_id != employee_id);
        Ok(())
    }

    async fn commit_transition(
        &self,
        period: &PayrollPeriod,
        results: &[EmployeeResult],
        audit: &AuditEvent,
    ) -> Result<(), PeriodError> {
        let mut periods = self.periods.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let snapshot = periods
            .get_mut(&period.id)
            .ok_or(PeriodError::PeriodNotFound(period.id))?;
        snapshot.period = period.clone();
        snapshot.results = results.to_vec();
        self.audit_log.lock().unwrap_or_else(std::sync::PoisonError::into_inner).push(audit.clone());
        Ok(())
    }

    async fn update_period(&self, period: &PayrollPeriod) -> Result<(), PeriodError> {
        let mut periods = self.periods.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let snapshot = periods
            .get_mut(&period.id)
            .ok_or(PeriodError::PeriodNotFound(period.id))?;
        snapshot.period = period.clone();
        Ok(())
    }
}

/// Identity directory backed by a fixed employee map.
#[derive(Default)]
pub struct StaticDirectory {
    employees: Mutex<HashMap<EmployeeId, EmployeeProfile>>,
}

impl StaticDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an employee and returns their profile.
    pub fn add_employee(&self, display_name: &str) -> EmployeeProfile {
        let profile = EmployeeProfile {
            id: EmployeeId::new(),
            display_name: display_name.to_string(),
        };
        self.employees
            .lock()
            .unwrap()
            .insert(profile.id, profile.clone());
        profile
    }
}

impl IdentityDirectory for StaticDirectory {
    async fn resolve_employee(
        &self,
        id: EmployeeId,
    ) -> Result<Option<EmployeeProfile>, PeriodError> {
        Ok(self.employees.lock().unwrap_or_else(std::sync::PoisonError::into_inner).get(&id).cloned())
    }
}

/// Compensation source backed by a fixed base-amount map.
#[derive(Default)]
pub struct StaticCompensation {
    amounts: Mutex<HashMap<EmployeeId, EmployeeBaseAmounts>>,
}

impl StaticCompensation {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base amounts for an employee.
    pub fn set(&self, employee_id: EmployeeId, amounts: EmployeeBaseAmounts) {
        self.amounts.lock().unwrap_or_else(std::sync::PoisonError::into_inner).insert(employee_id, amounts);
    }
}

impl CompensationSource for StaticCompensation {
    async fn base_amounts(
        &self,
        _tenant_id: TenantId,
        _month: u32,
        _year: i32,
        employees: &[EmployeeId],
    ) -> Result<HashMap<EmployeeId, EmployeeBaseAmounts>, PeriodError> {
        let amounts = self.amounts.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(employees
            .iter()
            .filter_map(|id| amounts.get(id).map(|a| (*id, *a)))
            .collect())
    }
}

/// Authorizer with explicit per-actor capability grants.
#[derive(Default)]
pub struct StaticAuthorizer {
    allow_all: bool,
    grants: Mutex<HashMap<UserId, Vec<Capability>>>,
}

impl StaticAuthorizer {
    /// Creates an authorizer that denies everything until granted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an authorizer that allows every capability.
    #[must_use]
    pub fn allow_all() -> Self {
        Self {
            allow_all: true,
            grants: Mutex::new(HashMap::new()),
        }
    }

    /// Grants a capability to an actor.
    pub fn grant(&self, actor: UserId, capability: Capability) {
        self.grants
            .lock()
            .unwrap()
            .entry(actor)
            .or_default()
            .push(capability);
    }
}

impl Authorizer for StaticAuthorizer {
    async fn allows(
        &self,
        actor: UserId,
        capability: Capability,
        _period: &PayrollPeriod,
    ) -> Result<bool, PeriodError> {
        if self.allow_all {
            return Ok(true);
        }
        Ok(self
            .grants
            .lock()
            .unwrap()
            .get(&actor)
            .is_some_and(|caps| caps.contains(&capability)))
    }
}
