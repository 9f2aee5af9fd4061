use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{
    self, BookId, Copies, DomainError, LateFee, UserId,
    notifications::{ACCOUNT_NOT_ACTIVE, borrowed_message, returned_message},
};
use crate::ports::{NotificationSink, UserStatusProvider};

use super::errors::{LendingError, Result};

/// 在庫と貸出記録
///
/// ロックの内側で扱う純粋なデータ構造。I/Oは一切行わない。
#[derive(Debug, Default)]
struct LendingState {
    /// 書籍ID → 貸出可能冊数
    inventory: HashMap<BookId, u32>,
    /// 書籍ID → 貸出中の利用者（1冊につき1エントリ）
    loans: HashMap<BookId, Vec<UserId>>,
}

impl LendingState {
    /// 不変条件：在庫数 + 貸出中の冊数 ≤ `u32::MAX`（返却時の加算があふれない）
    fn add_copies(
        &mut self,
        book_id: &BookId,
        copies: Copies,
    ) -> std::result::Result<u32, DomainError> {
        let updated = self
            .available(book_id)
            .checked_add(copies.value())
            .filter(|updated| updated.checked_add(self.on_loan(book_id)).is_some())
            .ok_or(DomainError::CopiesOverflow)?;
        self.inventory.insert(book_id.clone(), updated);
        Ok(updated)
    }

    fn available(&self, book_id: &BookId) -> u32 {
        self.inventory.get(book_id).copied().unwrap_or(0)
    }

    fn on_loan(&self, book_id: &BookId) -> u32 {
        self.loans
            .get(book_id)
            .map_or(0, |borrowers| u32::try_from(borrowers.len()).unwrap_or(u32::MAX))
    }

    /// 1冊貸し出す。在庫がなければ`None`（状態は変更しない）。
    fn checkout(&mut self, book_id: &BookId, user_id: &UserId) -> Option<u32> {
        let count = self.inventory.get_mut(book_id).filter(|count| **count > 0)?;
        *count -= 1;
        let remaining = *count;

        self.loans
            .entry(book_id.clone())
            .or_default()
            .push(user_id.clone());

        Some(remaining)
    }

    /// 1冊返却する。該当する貸出記録がない、または在庫数があふれる場合は
    /// `None`（状態は変更しない）。
    fn checkin(&mut self, book_id: &BookId, user_id: &UserId) -> Option<u32> {
        let restocked = self.available(book_id).checked_add(1)?;

        let borrowers = self.loans.get_mut(book_id)?;
        let position = borrowers.iter().position(|borrower| borrower == user_id)?;
        borrowers.remove(position);
        if borrowers.is_empty() {
            self.loans.remove(book_id);
        }

        self.inventory.insert(book_id.clone(), restocked);
        Some(restocked)
    }

    fn borrowers(&self, book_id: &BookId) -> Vec<UserId> {
        self.loans.get(book_id).cloned().unwrap_or_default()
    }
}

/// 貸出・返却の結果
///
/// `available_copies`は判定と同じロック区間で読んだ値。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanOutcome {
    pub success: bool,
    pub available_copies: u32,
}

/// 貸出マネージャー
///
/// 在庫管理・貸出/返却の状態遷移・延滞料金計算を調整する。
/// 外部依存（利用者ステータス・通知）はポートとして注入する。
///
/// # 並行性
///
/// 在庫と貸出記録はインスタンスごとに1つの`Mutex`で保護する。
/// ロックはメモリ上の確認と更新の間だけ保持し、`.await`をまたがない。
/// ポートの呼び出しは常にロックの外で行う。
pub struct LendingManager {
    user_status: Arc<dyn UserStatusProvider>,
    notifications: Arc<dyn NotificationSink>,
    state: Mutex<LendingState>,
}

impl LendingManager {
    pub fn new(
        user_status: Arc<dyn UserStatusProvider>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            user_status,
            notifications,
            state: Mutex::new(LendingState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, LendingState> {
        // 更新はすべて検証後に行うため、ロック区間内でpanicしない
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 書籍を在庫に追加する
    ///
    /// 未登録の書籍IDは`copies`冊で登録し、登録済みなら加算する。
    ///
    /// # 戻り値
    /// 追加後の貸出可能冊数
    ///
    /// # エラー
    /// - InvalidArgument(NegativeCopies): `copies`が負
    /// - InvalidArgument(CopiesOverflow): 加算結果が上限を超える
    pub fn add_book(&self, book_id: &BookId, copies: i64) -> Result<u32> {
        let copies = Copies::try_from(copies)?;
        let available = self.state().add_copies(book_id, copies)?;

        tracing::info!(%book_id, added = copies.value(), available, "book added to inventory");
        Ok(available)
    }

    /// 貸出可能冊数を取得する（未登録の書籍は0）
    pub fn get_available_copies(&self, book_id: &BookId) -> u32 {
        self.state().available(book_id)
    }

    /// 書籍を貸し出す
    ///
    /// ビジネスルール（この順で判定）：
    /// 1. 利用者が有効でなければ「Your account is not active.」を通知して`false`
    /// 2. 在庫がない（または未登録）なら通知なしで`false`
    /// 3. 在庫を1減らし、貸出を記録し、貸出確認を通知して`true`
    ///
    /// # エラー
    /// - UserStatusError: 利用者ステータスの取得失敗（状態は変更されない）
    pub async fn borrow_book(&self, book_id: &BookId, user_id: &UserId) -> Result<bool> {
        Ok(self.borrow_with_outcome(book_id, user_id).await?.success)
    }

    /// `borrow_book`と同じ判定を行い、直後の貸出可能冊数も返す
    pub async fn borrow_with_outcome(
        &self,
        book_id: &BookId,
        user_id: &UserId,
    ) -> Result<LoanOutcome> {
        let active = self
            .user_status
            .is_user_active(user_id)
            .await
            .map_err(LendingError::UserStatusError)?;

        if !active {
            tracing::debug!(%book_id, %user_id, "borrow rejected: account not active");
            self.notify(user_id, ACCOUNT_NOT_ACTIVE).await;
            return Ok(LoanOutcome {
                success: false,
                available_copies: self.get_available_copies(book_id),
            });
        }

        let outcome = {
            let mut state = self.state();
            match state.checkout(book_id, user_id) {
                Some(remaining) => LoanOutcome {
                    success: true,
                    available_copies: remaining,
                },
                None => LoanOutcome {
                    success: false,
                    available_copies: state.available(book_id),
                },
            }
        };

        if !outcome.success {
            tracing::debug!(%book_id, %user_id, "borrow rejected: no copies available");
            return Ok(outcome);
        }

        tracing::info!(
            %book_id,
            %user_id,
            remaining = outcome.available_copies,
            "book borrowed"
        );
        self.notify(user_id, &borrowed_message(book_id)).await;
        Ok(outcome)
    }

    /// 書籍を返却する
    ///
    /// ビジネスルール：
    /// - この利用者の貸出記録がなければ、通知も状態変更もせず`false`
    /// - あれば記録を1件削除し、在庫を1増やし、返却確認を通知して`true`
    pub async fn return_book(&self, book_id: &BookId, user_id: &UserId) -> Result<bool> {
        Ok(self.return_with_outcome(book_id, user_id).await?.success)
    }

    /// `return_book`と同じ判定を行い、直後の貸出可能冊数も返す
    pub async fn return_with_outcome(
        &self,
        book_id: &BookId,
        user_id: &UserId,
    ) -> Result<LoanOutcome> {
        let outcome = {
            let mut state = self.state();
            match state.checkin(book_id, user_id) {
                Some(available) => LoanOutcome {
                    success: true,
                    available_copies: available,
                },
                None => LoanOutcome {
                    success: false,
                    available_copies: state.available(book_id),
                },
            }
        };

        if !outcome.success {
            tracing::debug!(%book_id, %user_id, "return rejected: no matching loan");
            return Ok(outcome);
        }

        tracing::info!(
            %book_id,
            %user_id,
            available = outcome.available_copies,
            "book returned"
        );
        self.notify(user_id, &returned_message(book_id)).await;
        Ok(outcome)
    }

    /// 延滞料金を計算する
    ///
    /// 詳細は[`domain::late_fee::calculate_dynamic_late_fee`]を参照。
    pub fn calculate_dynamic_late_fee(
        &self,
        overdue_days: i64,
        is_bestseller: bool,
        is_premium_user: bool,
    ) -> Result<LateFee> {
        let fee =
            domain::calculate_dynamic_late_fee(overdue_days, is_bestseller, is_premium_user)?;
        Ok(fee)
    }

    /// 書籍を現在借りている利用者の一覧（貸出中の冊数分）
    pub fn borrowers_of(&self, book_id: &BookId) -> Vec<UserId> {
        self.state().borrowers(book_id)
    }

    pub fn is_borrowed_by(&self, book_id: &BookId, user_id: &UserId) -> bool {
        self.state()
            .loans
            .get(book_id)
            .is_some_and(|borrowers| borrowers.contains(user_id))
    }

    async fn notify(&self, user_id: &UserId, message: &str) {
        if let Err(e) = self.notifications.notify_user(user_id, message).await {
            tracing::warn!(%user_id, error = %e, "failed to deliver notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str) -> BookId {
        BookId::new(id).unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn test_add_copies_initializes_then_accumulates() {
        let mut state = LendingState::default();
        assert_eq!(state.add_copies(&book("a"), Copies::new(7)), Ok(7));
        assert_eq!(state.add_copies(&book("a"), Copies::new(3)), Ok(10));
        assert_eq!(state.available(&book("a")), 10);
    }

    #[test]
    fn test_add_copies_overflow_leaves_count() {
        let mut state = LendingState::default();
        state.add_copies(&book("a"), Copies::new(u32::MAX)).unwrap();

        let result = state.add_copies(&book("a"), Copies::new(1));

        assert_eq!(result, Err(DomainError::CopiesOverflow));
        assert_eq!(state.available(&book("a")), u32::MAX);
    }

    #[test]
    fn test_add_copies_counts_copies_on_loan() {
        let mut state = LendingState::default();
        state.add_copies(&book("a"), Copies::new(u32::MAX)).unwrap();
        state.checkout(&book("a"), &user("u")).unwrap();

        // 在庫 MAX-1 + 貸出中 1 で上限に達している
        let result = state.add_copies(&book("a"), Copies::new(1));

        assert_eq!(result, Err(DomainError::CopiesOverflow));
        assert_eq!(state.available(&book("a")), u32::MAX - 1);
        assert_eq!(state.checkin(&book("a"), &user("u")), Some(u32::MAX));
        assert!(state.borrowers(&book("a")).is_empty());
    }

    #[test]
    fn test_checkin_at_max_stock_keeps_loan_record() {
        let mut state = LendingState::default();
        state.inventory.insert(book("a"), u32::MAX);
        state.loans.insert(book("a"), vec![user("u")]);

        assert_eq!(state.checkin(&book("a"), &user("u")), None);
        assert_eq!(state.available(&book("a")), u32::MAX);
        assert_eq!(state.borrowers(&book("a")), vec![user("u")]);
    }

    #[test]
    fn test_available_unknown_book_is_zero() {
        let state = LendingState::default();
        assert_eq!(state.available(&book("missing")), 0);
    }

    #[test]
    fn test_checkout_fails_without_stock() {
        let mut state = LendingState::default();
        state.add_copies(&book("a"), Copies::new(0)).unwrap();

        assert_eq!(state.checkout(&book("a"), &user("u")), None);
        assert_eq!(state.checkout(&book("missing"), &user("u")), None);
        assert!(state.loans.is_empty());
    }

    #[test]
    fn test_checkout_then_checkin_restores_state() {
        let mut state = LendingState::default();
        state.add_copies(&book("a"), Copies::new(2)).unwrap();

        assert_eq!(state.checkout(&book("a"), &user("u")), Some(1));
        assert_eq!(state.borrowers(&book("a")), vec![user("u")]);

        assert_eq!(state.checkin(&book("a"), &user("u")), Some(2));
        assert!(state.borrowers(&book("a")).is_empty());
        assert!(!state.loans.contains_key(&book("a")));
    }

    #[test]
    fn test_checkin_by_other_user_is_rejected() {
        let mut state = LendingState::default();
        state.add_copies(&book("a"), Copies::new(1)).unwrap();
        state.checkout(&book("a"), &user("u")).unwrap();

        assert_eq!(state.checkin(&book("a"), &user("other")), None);
        assert_eq!(state.available(&book("a")), 0);
        assert_eq!(state.borrowers(&book("a")), vec![user("u")]);
    }

    #[test]
    fn test_checkin_removes_only_one_entry() {
        let mut state = LendingState::default();
        state.add_copies(&book("a"), Copies::new(3)).unwrap();
        state.checkout(&book("a"), &user("u")).unwrap();
        state.checkout(&book("a"), &user("u")).unwrap();

        state.checkin(&book("a"), &user("u")).unwrap();

        assert_eq!(state.borrowers(&book("a")), vec![user("u")]);
        assert_eq!(state.available(&book("a")), 2);
    }
}
