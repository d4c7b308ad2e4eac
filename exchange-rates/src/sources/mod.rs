//! One adapter per remote exchange rate provider.

mod bank_of_canada;
mod bank_of_israel;
mod bank_of_russia;
mod central_bank_of_hungary;
mod central_bank_of_myanmar;
mod central_bank_of_uzbekistan;
mod czech_national_bank;
mod danmarks_national_bank;
mod euro_central_bank;
mod international_monetary_fund;
mod monetary_authority_of_singapore;
mod national_bank_of_georgia;
mod national_bank_of_poland;
mod national_bank_of_romania;
mod national_bank_of_ukraine;
mod norges_bank;
mod reserve_bank_of_australia;
mod swiss_national_bank;
mod techcombank;

pub use bank_of_canada::BankOfCanadaDataSource;
pub use bank_of_israel::BankOfIsraelDataSource;
pub use bank_of_russia::BankOfRussiaDataSource;
pub use central_bank_of_hungary::CentralBankOfHungaryDataSource;
pub use central_bank_of_myanmar::CentralBankOfMyanmarDataSource;
pub use central_bank_of_uzbekistan::CentralBankOfUzbekistanDataSource;
pub use czech_national_bank::CzechNationalBankDataSource;
pub use danmarks_national_bank::DanmarksNationalBankDataSource;
pub use euro_central_bank::EuroCentralBankDataSource;
pub use international_monetary_fund::InternationalMonetaryFundDataSource;
pub use monetary_authority_of_singapore::MonetaryAuthorityOfSingaporeDataSource;
pub use national_bank_of_georgia::NationalBankOfGeorgiaDataSource;
pub use national_bank_of_poland::NationalBankOfPolandDataSource;
pub use national_bank_of_romania::NationalBankOfRomaniaDataSource;
pub use national_bank_of_ukraine::NationalBankOfUkraineDataSource;
pub use norges_bank::NorgesBankDataSource;
pub use reserve_bank_of_australia::ReserveBankOfAustraliaDataSource;
pub use swiss_national_bank::SwissNationalBankDataSource;
pub use techcombank::TechcombankDataSource;
