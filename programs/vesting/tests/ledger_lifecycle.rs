use anchor_lang::prelude::*;
use vesting_escrow::error::VestingError;
use vesting_escrow::guard::Caller;
use vesting_escrow::ledger::{VestingLedger, VestingTerms};
use vesting_escrow::state::ScheduleStatus;

const T: i64 = 1_700_000_000;
const TOTAL: u64 = 1_000_000_000000;

struct Setup {
    ledger: VestingLedger,
    admin: Pubkey,
    beneficiary: Pubkey,
    mint: Pubkey,
    schedule: Pubkey,
}

impl Setup {
    fn new(terms: VestingTerms) -> Self {
        let mut ledger = VestingLedger::new(vesting_escrow::ID);
        let admin = Pubkey::new_unique();
        let beneficiary = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        ledger.issue(&admin, &mint, terms.total_amount).unwrap();
        let schedule = ledger
            .create(&Caller::signer(admin), &beneficiary, &mint, &terms)
            .unwrap();
        Self {
            ledger,
            admin,
            beneficiary,
            mint,
            schedule,
        }
    }

    fn funded(terms: VestingTerms) -> Self {
        let mut s = Self::new(terms);
        s.ledger
            .deposit(&Caller::signer(s.admin), &s.schedule, &s.mint)
            .unwrap();
        s
    }

    fn claim(&mut self, now: i64) -> std::result::Result<u64, VestingError> {
        self.ledger
            .claim(&Caller::signer(self.beneficiary), &self.schedule, &self.mint, now)
    }

    fn assert_invariants(&self) {
        let snap = self.ledger.read_schedule(&self.schedule).unwrap();
        assert!(snap.released_amount <= snap.total_amount);
        assert!(snap.total_amount > 0);
        assert!(snap.start_time <= snap.cliff_time && snap.cliff_time <= snap.end_time);
        assert!(snap.start_time < snap.end_time);
        if snap.status != ScheduleStatus::Created {
            assert!(snap.vault_balance >= snap.total_amount - snap.released_amount);
        }
        let vault = self.ledger.holding(&snap.vault).unwrap();
        assert_eq!(vault.owner, self.schedule);
        assert_eq!(vault.mint, snap.mint);
    }
}

fn standard_terms() -> VestingTerms {
    VestingTerms {
        seed: 0,
        total_amount: TOTAL,
        start_time: T - 100,
        cliff_time: T - 50,
        end_time: T + 100,
    }
}

#[test]
fn full_lifecycle() {
    let mut s = Setup::new(standard_terms());
    let snap = s.ledger.read_schedule(&s.schedule).unwrap();
    assert_eq!(snap.status, ScheduleStatus::Created);
    assert_eq!(snap.vault_balance, 0);
    assert_eq!(snap.admin, s.admin);
    assert_eq!(s.ledger.schedule(&s.schedule).unwrap().bump, snap.bump);
    s.assert_invariants();

    s.ledger
        .deposit(&Caller::signer(s.admin), &s.schedule, &s.mint)
        .unwrap();
    assert_eq!(s.ledger.balance(&s.admin, &s.mint), 0);
    let snap = s.ledger.read_schedule(&s.schedule).unwrap();
    assert_eq!(snap.status, ScheduleStatus::Funded);
    assert_eq!(snap.vault_balance, TOTAL);
    s.assert_invariants();

    let first = s.claim(T).unwrap();
    assert_eq!(first, TOTAL / 2);
    assert_eq!(
        s.ledger.read_schedule(&s.schedule).unwrap().status,
        ScheduleStatus::PartiallyReleased
    );
    s.assert_invariants();

    let rest = s.claim(T + 100).unwrap();
    assert_eq!(first + rest, TOTAL);
    assert_eq!(s.ledger.balance(&s.beneficiary, &s.mint), TOTAL);
    let snap = s.ledger.read_schedule(&s.schedule).unwrap();
    assert_eq!(snap.status, ScheduleStatus::FullyReleased);
    assert_eq!(snap.vault_balance, 0);
    s.assert_invariants();
}

#[test]
fn linear_mid_schedule_lands_near_half() {
    let mut s = Setup::funded(standard_terms());
    s.claim(T).unwrap();
    let released = s.ledger.read_schedule(&s.schedule).unwrap().released_amount;
    assert!(released >= TOTAL / 10 * 4 && released <= TOTAL / 10 * 6);
}

#[test]
fn cliff_gate() {
    let mut s = Setup::funded(standard_terms());
    let before = s.ledger.clone();
    for now in [T - 1_000, T - 100, T - 51] {
        assert_eq!(s.claim(now), Err(VestingError::NothingToClaim));
    }
    assert_eq!(s.ledger, before);
    // At the cliff, time since start counts.
    assert_eq!(s.claim(T - 50).unwrap(), TOTAL / 4);
}

#[test]
fn full_release_at_horizon_in_one_claim() {
    let mut s = Setup::funded(standard_terms());
    assert_eq!(s.claim(T + 1_000_000).unwrap(), TOTAL);
    let snap = s.ledger.read_schedule(&s.schedule).unwrap();
    assert_eq!(snap.released_amount, TOTAL);
    assert_eq!(snap.vault_balance, 0);
}

#[test]
fn terminal_schedule_rejects_everything() {
    let mut s = Setup::funded(standard_terms());
    s.claim(T + 100).unwrap();
    s.ledger.issue(&s.admin, &s.mint, TOTAL).unwrap();
    let before = s.ledger.clone();

    assert_eq!(s.claim(T + 200), Err(VestingError::NotFunded));
    assert_eq!(
        s.ledger.deposit(&Caller::signer(s.admin), &s.schedule, &s.mint),
        Err(VestingError::AlreadyFunded)
    );
    assert_eq!(s.ledger, before);
}

#[test]
fn repeated_claims_are_monotonic_and_conserve() {
    let terms = VestingTerms {
        seed: 1,
        total_amount: 1_000_003,
        start_time: 0,
        cliff_time: 10,
        end_time: 97,
    };
    let mut s = Setup::funded(terms);
    let mut last = 0;
    let mut paid = 0;
    for now in 0..=120 {
        match s.claim(now) {
            Ok(amount) => paid += amount,
            // An emptied vault reads as unfunded.
            Err(VestingError::NotFunded) => assert_eq!(last, terms.total_amount),
            Err(e) => assert_eq!(e, VestingError::NothingToClaim, "now={now}"),
        }
        let snap = s.ledger.read_schedule(&s.schedule).unwrap();
        assert!(snap.released_amount >= last);
        last = snap.released_amount;
        assert_eq!(paid, snap.released_amount);
        s.assert_invariants();
    }
    assert_eq!(last, terms.total_amount);
}

#[test]
fn nothing_newly_vested_is_nothing_to_claim() {
    let mut s = Setup::funded(standard_terms());
    s.claim(T).unwrap();
    assert_eq!(s.claim(T), Err(VestingError::NothingToClaim));
}

#[test]
fn claim_before_funding_is_not_funded() {
    let mut s = Setup::new(standard_terms());
    let before = s.ledger.clone();
    assert_eq!(s.claim(T + 1_000), Err(VestingError::NotFunded));
    assert_eq!(s.ledger, before);
}

#[test]
fn second_deposit_is_already_funded_for_any_caller() {
    let mut s = Setup::funded(standard_terms());
    s.ledger.issue(&s.admin, &s.mint, TOTAL).unwrap();
    let before = s.ledger.clone();
    for who in [s.admin, s.beneficiary, Pubkey::new_unique()] {
        assert_eq!(
            s.ledger.deposit(&Caller::signer(who), &s.schedule, &s.mint),
            Err(VestingError::AlreadyFunded)
        );
        assert_eq!(
            s.ledger.deposit(&Caller::unsigned(who), &s.schedule, &s.mint),
            Err(VestingError::AlreadyFunded)
        );
    }
    assert_eq!(s.ledger, before);
}

#[test]
fn authorization_isolation() {
    let mut s = Setup::new(standard_terms());
    let intruder = Pubkey::new_unique();
    s.ledger.issue(&intruder, &s.mint, TOTAL).unwrap();
    let before = s.ledger.clone();

    for caller in [
        Caller::signer(intruder),
        Caller::signer(s.beneficiary),
        Caller::unsigned(s.admin),
    ] {
        assert_eq!(
            s.ledger.deposit(&caller, &s.schedule, &s.mint),
            Err(VestingError::UnauthorizedAdmin)
        );
    }
    assert_eq!(s.ledger, before);

    s.ledger
        .deposit(&Caller::signer(s.admin), &s.schedule, &s.mint)
        .unwrap();
    let before = s.ledger.clone();
    for caller in [
        Caller::signer(intruder),
        Caller::signer(s.admin),
        Caller::unsigned(s.beneficiary),
    ] {
        assert_eq!(
            s.ledger.claim(&caller, &s.schedule, &s.mint, T + 100),
            Err(VestingError::UnauthorizedBeneficiary)
        );
    }
    assert_eq!(s.ledger, before);
}

#[test]
fn wrong_mint_is_rejected() {
    let mut s = Setup::new(standard_terms());
    let other = Pubkey::new_unique();
    s.ledger.issue(&s.admin, &other, TOTAL).unwrap();
    let before = s.ledger.clone();
    assert_eq!(
        s.ledger.deposit(&Caller::signer(s.admin), &s.schedule, &other),
        Err(VestingError::MintMismatch)
    );
    assert_eq!(s.ledger, before);

    s.ledger
        .deposit(&Caller::signer(s.admin), &s.schedule, &s.mint)
        .unwrap();
    assert_eq!(
        s.ledger
            .claim(&Caller::signer(s.beneficiary), &s.schedule, &other, T + 100),
        Err(VestingError::MintMismatch)
    );
}

#[test]
fn short_funded_admin_cannot_deposit() {
    let mut ledger = VestingLedger::new(vesting_escrow::ID);
    let admin = Pubkey::new_unique();
    let beneficiary = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    let terms = standard_terms();
    ledger.issue(&admin, &mint, TOTAL - 1).unwrap();
    let schedule = ledger
        .create(&Caller::signer(admin), &beneficiary, &mint, &terms)
        .unwrap();
    let before = ledger.clone();
    assert_eq!(
        ledger.deposit(&Caller::signer(admin), &schedule, &mint),
        Err(VestingError::DepositAmountMismatch)
    );
    assert_eq!(ledger, before);

    // No token account at all.
    let stranger_mint = Pubkey::new_unique();
    let other = ledger
        .create(
            &Caller::signer(admin),
            &beneficiary,
            &stranger_mint,
            &terms,
        )
        .unwrap();
    assert_eq!(
        ledger.deposit(&Caller::signer(admin), &other, &stranger_mint),
        Err(VestingError::DepositAmountMismatch)
    );
}

#[test]
fn stray_vault_tokens_block_funding() {
    let mut s = Setup::new(standard_terms());
    // Anyone can send tokens to the vault's address.
    s.ledger.issue(&s.schedule, &s.mint, 1).unwrap();
    assert_eq!(
        s.ledger
            .deposit(&Caller::signer(s.admin), &s.schedule, &s.mint),
        Err(VestingError::AlreadyFunded)
    );
}

#[test]
fn vault_top_up_does_not_block_claims() {
    let mut s = Setup::funded(standard_terms());
    s.ledger.issue(&s.schedule, &s.mint, 1).unwrap();

    let first = s.claim(T).unwrap();
    assert_eq!(first, TOTAL / 2);
    s.assert_invariants();
    let rest = s.claim(T + 100).unwrap();
    assert_eq!(first + rest, TOTAL);
    s.assert_invariants();

    let snap = s.ledger.read_schedule(&s.schedule).unwrap();
    assert_eq!(snap.status, ScheduleStatus::FullyReleased);
    assert_eq!(snap.released_amount, TOTAL);
    assert_eq!(snap.vault_balance, 1);
    assert_eq!(s.ledger.balance(&s.beneficiary, &s.mint), TOTAL);
    // The surplus is never paid out.
    assert_eq!(s.claim(T + 10_000), Err(VestingError::NothingToClaim));
}

#[test]
fn create_rejections_leave_ledger_untouched() {
    let mut ledger = VestingLedger::new(vesting_escrow::ID);
    let admin = Caller::signer(Pubkey::new_unique());
    let beneficiary = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    let good = standard_terms();
    let before = ledger.clone();

    let zero = VestingTerms {
        total_amount: 0,
        ..good
    };
    assert_eq!(
        ledger.create(&admin, &beneficiary, &mint, &zero),
        Err(VestingError::InvalidAmount)
    );
    let inverted = VestingTerms {
        cliff_time: good.end_time + 1,
        ..good
    };
    assert_eq!(
        ledger.create(&admin, &beneficiary, &mint, &inverted),
        Err(VestingError::InvalidTimeRange)
    );
    let instant = VestingTerms {
        start_time: T,
        cliff_time: T,
        end_time: T,
        ..good
    };
    assert_eq!(
        ledger.create(&admin, &beneficiary, &mint, &instant),
        Err(VestingError::InvalidTimeRange)
    );
    assert_eq!(
        ledger.create(&admin, &Pubkey::default(), &mint, &good),
        Err(VestingError::AddressMismatch)
    );
    assert_eq!(ledger, before);

    ledger.create(&admin, &beneficiary, &mint, &good).unwrap();
    let after_first = ledger.clone();
    // Same beneficiary, mint and seed resolve to the same address.
    assert_eq!(
        ledger.create(&admin, &beneficiary, &mint, &good),
        Err(VestingError::AddressMismatch)
    );
    assert_eq!(ledger, after_first);
}

#[test]
fn seeds_allow_parallel_schedules() {
    let mut ledger = VestingLedger::new(vesting_escrow::ID);
    let admin = Pubkey::new_unique();
    let beneficiary = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    ledger.issue(&admin, &mint, 300).unwrap();

    let mut schedules = Vec::new();
    for seed in 0..3u64 {
        let terms = VestingTerms {
            seed,
            total_amount: 100,
            start_time: 0,
            cliff_time: 0,
            end_time: 100 * (seed as i64 + 1),
        };
        let address = ledger
            .create(&Caller::signer(admin), &beneficiary, &mint, &terms)
            .unwrap();
        ledger
            .deposit(&Caller::signer(admin), &address, &mint)
            .unwrap();
        schedules.push(address);
    }
    schedules.dedup();
    assert_eq!(schedules.len(), 3);

    // Claiming one schedule leaves the others untouched.
    let untouched: Vec<_> = schedules[1..]
        .iter()
        .map(|a| ledger.read_schedule(a).unwrap())
        .collect();
    let paid = ledger
        .claim(&Caller::signer(beneficiary), &schedules[0], &mint, 50)
        .unwrap();
    assert_eq!(paid, 50);
    for (a, snap) in schedules[1..].iter().zip(untouched) {
        assert_eq!(ledger.read_schedule(a).unwrap(), snap);
    }
    assert_eq!(ledger.balance(&beneficiary, &mint), 50);
}

#[test]
fn snapshot_claimable_matches_claim() {
    let mut s = Setup::funded(standard_terms());
    let snap = s.ledger.read_schedule(&s.schedule).unwrap();
    let preview = snap.claimable_at(T + 10).unwrap();
    assert_eq!(s.claim(T + 10).unwrap(), preview);
    assert_eq!(
        snap.vault,
        s.ledger.vault_address(&s.schedule, &s.mint)
    );
}

#[test]
fn token_2022_vaults_are_distinct() {
    let program = vesting_escrow::ID;
    let classic = VestingLedger::new(program);
    let t22 = VestingLedger::with_token_program(program, anchor_spl::token_2022::ID);
    let schedule = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    assert_ne!(
        classic.vault_address(&schedule, &mint),
        t22.vault_address(&schedule, &mint)
    );
}
