use crate::domain::change::{self, Breakdown};
use crate::domain::ledger::LedgerRecord;
use crate::domain::money::Money;
use crate::domain::ports::LedgerStoreBox;
use crate::error::{Result, TillError};
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// A recorded transaction together with the notes and coins to hand back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub record: LedgerRecord,
    pub breakdown: Breakdown,
}

impl Receipt {
    pub fn has_change(&self) -> bool {
        !self.record.change.is_zero()
    }
}

/// The cash register: validates a payment, works out the change and records it.
///
/// The register owns the receipt counter. The counter lock is held from the moment a
/// receipt number is read until the ledger append completes, so concurrent callers
/// can never persist the same number. The counter only advances after a successful
/// append.
pub struct CashRegister {
    ledger: LedgerStoreBox,
    next_receipt_no: Mutex<u32>,
}

impl CashRegister {
    /// Creates a register that will issue `first_receipt_no` next.
    pub fn new(ledger: LedgerStoreBox, first_receipt_no: u32) -> Self {
        Self {
            ledger,
            next_receipt_no: Mutex::new(first_receipt_no),
        }
    }

    /// Creates a register that continues after the last record already in `ledger`.
    ///
    /// An empty ledger starts at `initial_receipt_no`. Fails when the last record
    /// already used the highest representable receipt number.
    pub async fn open(ledger: LedgerStoreBox, initial_receipt_no: u32) -> Result<Self> {
        let next = match ledger.last_receipt_no().await? {
            Some(last) => {
                let following = last
                    .checked_add(1)
                    .ok_or(TillError::ReceiptsExhausted(last))?;
                initial_receipt_no.max(following)
            }
            None => initial_receipt_no,
        };
        debug!(next_receipt_no = next, "Opened register");
        Ok(Self::new(ledger, next))
    }

    pub async fn next_receipt_no(&self) -> u32 {
        *self.next_receipt_no.lock().await
    }

    /// Processes one payment given in dollars.
    pub async fn process(&self, payable: Decimal, tendered: Decimal) -> Result<Receipt> {
        let payable = Money::from_decimal(payable)?;
        let tendered = Money::from_decimal(tendered)?;
        self.process_cents(payable, tendered).await
    }

    /// Processes one payment: validate, compute, decompose, persist.
    ///
    /// Nothing is written when the payment is insufficient. A residual remainder in the
    /// breakdown is logged but does not fail the transaction.
    pub async fn process_cents(&self, payable: Money, tendered: Money) -> Result<Receipt> {
        debug!(%payable, %tendered, "Validating payment");
        if let Err(e) = change::validate(payable, tendered) {
            info!(error = %e, "Payment rejected");
            return Err(e);
        }

        let change = change::compute_change(payable, tendered);
        debug!(%change, "Computed change");

        let breakdown = if change.is_zero() {
            Breakdown::default()
        } else {
            change::decompose(change)
        };
        if let Err(e) = breakdown.check() {
            warn!(error = %e, "Change breakdown left a remainder");
        }

        let record = self.record(payable, tendered, change).await?;
        Ok(Receipt { record, breakdown })
    }

    /// Appends a ledger record under the next receipt number.
    ///
    /// `u32::MAX` is never issued: the counter must be able to advance past the
    /// number it hands out, so the register refuses before writing anything.
    pub async fn record(
        &self,
        payable: Money,
        tendered: Money,
        change: Money,
    ) -> Result<LedgerRecord> {
        let mut next_receipt_no = self.next_receipt_no.lock().await;
        let following = next_receipt_no
            .checked_add(1)
            .ok_or(TillError::ReceiptsExhausted(*next_receipt_no))?;
        let record = LedgerRecord {
            receipt_no: *next_receipt_no,
            payable,
            tendered,
            change,
        };

        debug!(receipt_no = record.receipt_no, "Persisting transaction");
        if let Err(e) = self.ledger.append(record).await {
            warn!(receipt_no = record.receipt_no, error = %e, "Ledger append failed");
            return Err(e);
        }

        *next_receipt_no = following;
        info!(
            receipt_no = record.receipt_no,
            payable = %payable,
            tendered = %tendered,
            change = %change,
            "Transaction recorded"
        );
        Ok(record)
    }

    pub async fn history(&self) -> Result<Vec<LedgerRecord>> {
        self.ledger.records().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::LedgerStore;
    use crate::infrastructure::in_memory::InMemoryLedger;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Fails every append while `failing` is set.
    #[derive(Clone, Default)]
    struct FlakyLedger {
        inner: InMemoryLedger,
        failing: Arc<AtomicBool>,
    }

    #[async_trait]
    impl LedgerStore for FlakyLedger {
        async fn append(&self, record: LedgerRecord) -> Result<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(TillError::WriteFailure(std::io::Error::other("disk full")));
            }
            self.inner.append(record).await
        }

        async fn last_receipt_no(&self) -> Result<Option<u32>> {
            self.inner.last_receipt_no().await
        }

        async fn records(&self) -> Result<Vec<LedgerRecord>> {
            self.inner.records().await
        }
    }

    fn labels(receipt: &Receipt) -> Vec<(i64, &'static str)> {
        receipt
            .breakdown
            .lines
            .iter()
            .map(|line| (line.count, line.denomination.label))
            .collect()
    }

    #[tokio::test]
    async fn test_process_records_and_breaks_down() {
        let ledger = InMemoryLedger::new();
        let register = CashRegister::new(Box::new(ledger.clone()), 10000);

        let receipt = register.process(dec!(12.50), dec!(20.00)).await.unwrap();
        assert_eq!(receipt.record.receipt_no, 10000);
        assert_eq!(receipt.record.change, Money::from_cents(750));
        assert_eq!(
            labels(&receipt),
            vec![(1, "$5 note"), (1, "$2 note"), (1, "$0.50 coin")]
        );

        assert_eq!(ledger.records().await.unwrap(), vec![receipt.record]);
        assert_eq!(register.next_receipt_no().await, 10001);
    }

    #[tokio::test]
    async fn test_exact_payment_is_still_recorded() {
        let ledger = InMemoryLedger::new();
        let register = CashRegister::new(Box::new(ledger.clone()), 10000);

        let receipt = register.process(dec!(3.00), dec!(3.00)).await.unwrap();
        assert!(!receipt.has_change());
        assert!(receipt.breakdown.is_empty());
        assert_eq!(ledger.records().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_three_cents_over_is_no_change() {
        let register = CashRegister::new(Box::new(InMemoryLedger::new()), 10000);

        let receipt = register.process(dec!(10.00), dec!(10.03)).await.unwrap();
        assert!(!receipt.has_change());
        assert_eq!(receipt.record.tendered, Money::from_cents(1003));
    }

    #[tokio::test]
    async fn test_insufficient_payment_writes_nothing() {
        let ledger = InMemoryLedger::new();
        let register = CashRegister::new(Box::new(ledger.clone()), 10000);

        let result = register.process(dec!(20.00), dec!(19.99)).await;
        assert!(matches!(result, Err(TillError::InsufficientPayment { .. })));
        assert!(ledger.records().await.unwrap().is_empty());
        assert_eq!(register.next_receipt_no().await, 10000);
    }

    #[tokio::test]
    async fn test_negative_amount_rejected() {
        let register = CashRegister::new(Box::new(InMemoryLedger::new()), 10000);

        let result = register.process(dec!(-1.00), dec!(5.00)).await;
        assert!(matches!(result, Err(TillError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_consecutive_receipts_have_no_gaps() {
        let ledger = InMemoryLedger::new();
        let register = CashRegister::new(Box::new(ledger.clone()), 42);

        for _ in 0..25 {
            register.process(dec!(1.00), dec!(2.00)).await.unwrap();
        }

        let numbers: Vec<u32> = ledger
            .records()
            .await
            .unwrap()
            .iter()
            .map(|r| r.receipt_no)
            .collect();
        assert_eq!(numbers, (42..67).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_failed_append_does_not_consume_receipt() {
        let ledger = FlakyLedger::default();
        let register = CashRegister::new(Box::new(ledger.clone()), 10000);

        register.process(dec!(1.00), dec!(5.00)).await.unwrap();

        ledger.failing.store(true, Ordering::SeqCst);
        let result = register.process(dec!(1.00), dec!(5.00)).await;
        assert!(matches!(result, Err(TillError::WriteFailure(_))));
        assert_eq!(register.next_receipt_no().await, 10001);

        ledger.failing.store(false, Ordering::SeqCst);
        let receipt = register.process(dec!(1.00), dec!(5.00)).await.unwrap();
        assert_eq!(receipt.record.receipt_no, 10001);
    }

    #[tokio::test]
    async fn test_open_continues_after_last_record() {
        let existing = LedgerRecord {
            receipt_no: 10007,
            payable: Money::from_cents(100),
            tendered: Money::from_cents(100),
            change: Money::ZERO,
        };
        let ledger = InMemoryLedger::with_records(vec![existing]);

        let register = CashRegister::open(Box::new(ledger), 10000).await.unwrap();
        assert_eq!(register.next_receipt_no().await, 10008);

        let fresh = CashRegister::open(Box::new(InMemoryLedger::new()), 10000)
            .await
            .unwrap();
        assert_eq!(fresh.next_receipt_no().await, 10000);
    }

    #[tokio::test]
    async fn test_concurrent_processing_keeps_receipts_unique() {
        let ledger = InMemoryLedger::new();
        let register = Arc::new(CashRegister::new(Box::new(ledger.clone()), 10000));

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let register = Arc::clone(&register);
                tokio::spawn(async move { register.process(dec!(0.00), dec!(4.99)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let mut numbers: Vec<u32> = ledger
            .records()
            .await
            .unwrap()
            .iter()
            .map(|r| r.receipt_no)
            .collect();
        numbers.sort_unstable();
        assert_eq!(numbers, (10000..10050).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_exhausted_counter_refuses_without_writing() {
        let ledger = InMemoryLedger::new();
        let register = CashRegister::new(Box::new(ledger.clone()), u32::MAX);

        let result = register.process(dec!(1.00), dec!(2.00)).await;
        assert!(matches!(
            result,
            Err(TillError::ReceiptsExhausted(n)) if n == u32::MAX
        ));
        assert!(ledger.records().await.unwrap().is_empty());
        assert_eq!(register.next_receipt_no().await, u32::MAX);
    }

    #[tokio::test]
    async fn test_last_issuable_receipt_number() {
        let ledger = InMemoryLedger::new();
        let register = CashRegister::new(Box::new(ledger.clone()), u32::MAX - 1);

        let receipt = register.process(dec!(1.00), dec!(2.00)).await.unwrap();
        assert_eq!(receipt.record.receipt_no, u32::MAX - 1);
        assert!(register.process(dec!(1.00), dec!(2.00)).await.is_err());
        assert_eq!(ledger.records().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_open_on_exhausted_ledger_fails() {
        let last = LedgerRecord {
            receipt_no: u32::MAX,
            payable: Money::ZERO,
            tendered: Money::ZERO,
            change: Money::ZERO,
        };
        let ledger = InMemoryLedger::with_records(vec![last]);

        let result = CashRegister::open(Box::new(ledger), 10000).await;
        assert!(matches!(result, Err(TillError::ReceiptsExhausted(_))));
    }
}
