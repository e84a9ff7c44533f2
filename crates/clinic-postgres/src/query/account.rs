//! Company and account repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{Account, Company, NewAccount, NewCompany};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for the identities that sign in to the API.
pub trait AccountRepository {
    /// Creates a new company.
    fn create_company(
        &mut self,
        new_company: NewCompany,
    ) -> impl Future<Output = PgResult<Company>> + Send;

    /// Finds a company by its ID.
    fn find_company_by_id(
        &mut self,
        company_id: i64,
    ) -> impl Future<Output = PgResult<Option<Company>>> + Send;

    /// Finds the oldest company with the given name.
    fn find_company_by_name(
        &mut self,
        name: &str,
    ) -> impl Future<Output = PgResult<Option<Company>>> + Send;

    /// Creates a new account.
    fn create_account(
        &mut self,
        new_account: NewAccount,
    ) -> impl Future<Output = PgResult<Account>> + Send;

    /// Finds an account by its ID.
    fn find_account_by_id(
        &mut self,
        account_id: i64,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;

    /// Finds an account by its unique login.
    fn find_account_by_login(
        &mut self,
        login: &str,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;
}

impl AccountRepository for PgConnection {
    async fn create_company(&mut self, new_company: NewCompany) -> PgResult<Company> {
        use schema::companies;

        diesel::insert_into(companies::table)
            .values(&new_company)
            .returning(Company::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_company_by_id(&mut self, company_id: i64) -> PgResult<Option<Company>> {
        use schema::companies::{self, dsl};

        companies::table
            .filter(dsl::id.eq(company_id))
            .select(Company::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_company_by_name(&mut self, name: &str) -> PgResult<Option<Company>> {
        use schema::companies::{self, dsl};

        companies::table
            .filter(dsl::name.eq(name))
            .order(dsl::id.asc())
            .select(Company::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn create_account(&mut self, new_account: NewAccount) -> PgResult<Account> {
        use schema::accounts;

        diesel::insert_into(accounts::table)
            .values(&new_account)
            .returning(Account::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_account_by_id(&mut self, account_id: i64) -> PgResult<Option<Account>> {
        use schema::accounts::{self, dsl};

        accounts::table
            .filter(dsl::id.eq(account_id))
            .select(Account::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_account_by_login(&mut self, login: &str) -> PgResult<Option<Account>> {
        use schema::accounts::{self, dsl};

        accounts::table
            .filter(dsl::login.eq(login))
            .select(Account::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }
}
