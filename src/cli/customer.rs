//
//  stripe-kit
//  cli/customer.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Customer commands

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::api::common::{ListParams, SearchParams};
use crate::api::resources::customers::{Address, Customer, CustomerListParams, CustomerParams};
use crate::output::{print_field, print_header, OutputFormat, OutputWriter, TableOutput, TableRow};
use crate::util::{format_amount, format_relative_time, format_time, parse_key_value, truncate};

use super::GlobalOptions;

/// Manage customers
#[derive(Args, Debug)]
pub struct CustomerCommand {
    #[command(subcommand)]
    pub command: CustomerSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CustomerSubcommand {
    /// List customers
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View a customer
    #[command(visible_alias = "view")]
    Get(GetArgs),

    /// Create a customer
    Create(CustomerArgs),

    /// Update a customer
    #[command(visible_alias = "edit")]
    Update(UpdateArgs),

    /// Delete a customer
    Delete(DeleteArgs),

    /// Search customers with Stripe's query language
    Search(SearchArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Maximum number of customers to list (1-100)
    #[arg(long, short = 'l', default_value = "10", value_parser = clap::value_parser!(u32).range(1..=100))]
    pub limit: u32,

    /// Only customers with this exact email
    #[arg(long)]
    pub email: Option<String>,

    /// Cursor: list customers after this ID
    #[arg(long, value_name = "ID")]
    pub starting_after: Option<String>,

    /// Cursor: list customers before this ID
    #[arg(long, value_name = "ID", conflicts_with = "starting_after")]
    pub ending_before: Option<String>,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Customer ID
    pub id: String,

    /// Fields to expand (repeatable)
    #[arg(long, short = 'e')]
    pub expand: Vec<String>,
}

/// Fields shared by create and update.
#[derive(Args, Debug)]
pub struct CustomerArgs {
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Starting balance in the smallest currency unit; negative is credit
    #[arg(long, allow_negative_numbers = true)]
    pub balance: Option<i64>,

    /// Metadata entry as KEY=VALUE; KEY= removes the key (repeatable)
    #[arg(long, short = 'm', value_name = "KEY=VALUE")]
    pub metadata: Vec<String>,

    /// Preferred locale, most preferred first (repeatable)
    #[arg(long = "locale", value_name = "LOCALE")]
    pub preferred_locales: Vec<String>,

    #[arg(long)]
    pub city: Option<String>,

    /// Two-letter country code
    #[arg(long)]
    pub country: Option<String>,

    #[arg(long)]
    pub line1: Option<String>,

    #[arg(long)]
    pub line2: Option<String>,

    #[arg(long)]
    pub postal_code: Option<String>,

    #[arg(long)]
    pub state: Option<String>,
}

impl CustomerArgs {
    fn build_params(&self) -> Result<CustomerParams> {
        let address = Address {
            city: self.city.clone(),
            country: self.country.clone(),
            line1: self.line1.clone(),
            line2: self.line2.clone(),
            postal_code: self.postal_code.clone(),
            state: self.state.clone(),
        };

        let mut params = CustomerParams {
            address: (address != Address::default()).then_some(address),
            balance: self.balance,
            description: self.description.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            phone: self.phone.clone(),
            preferred_locales: (!self.preferred_locales.is_empty())
                .then(|| self.preferred_locales.clone()),
            ..Default::default()
        };

        for entry in &self.metadata {
            let (key, value) = parse_key_value(entry)?;
            params = params.metadata(key, value);
        }

        Ok(params)
    }
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Customer ID
    pub id: String,

    #[command(flatten)]
    pub fields: CustomerArgs,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Customer ID
    pub id: String,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query, e.g. "email:'jenny@example.com'"
    pub query: String,

    #[arg(long, short = 'l', default_value = "10", value_parser = clap::value_parser!(u32).range(1..=100))]
    pub limit: u32,

    /// next_page token from a previous search
    #[arg(long)]
    pub page: Option<String>,
}

impl CustomerCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            CustomerSubcommand::List(args) => self.list(args, global).await,
            CustomerSubcommand::Get(args) => self.get(args, global).await,
            CustomerSubcommand::Create(args) => self.create(args, global).await,
            CustomerSubcommand::Update(args) => self.update(args, global).await,
            CustomerSubcommand::Delete(args) => self.delete(args, global).await,
            CustomerSubcommand::Search(args) => self.search(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let writer = OutputWriter::new(OutputFormat::from_json_flag(global.json));

        let mut list = ListParams::new().limit(args.limit);
        if let Some(id) = &args.starting_after {
            list = list.starting_after(id);
        }
        if let Some(id) = &args.ending_before {
            list = list.ending_before(id);
        }
        let params = CustomerListParams {
            list,
            email: args.email.clone(),
        };

        let page = client.customers().list_all(&params).await?;

        if global.json {
            return crate::output::write_json(&page);
        }

        writer.write_list(&page.data)?;
        if let Some(cursor) = page.next_cursor() {
            println!(
                "{}",
                style(format!("More customers available: --starting-after {cursor}")).dim()
            );
        }
        Ok(())
    }

    async fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let writer = OutputWriter::new(OutputFormat::from_json_flag(global.json));

        let customer = client.customers().retrieve(&args.id, &args.expand).await?;
        writer.write(&customer)
    }

    async fn create(&self, args: &CustomerArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let writer = OutputWriter::new(OutputFormat::from_json_flag(global.json));

        let customer = client.customers().create(&args.build_params()?).await?;

        if global.json {
            writer.write(&customer)
        } else {
            writer.write_success(&format!("Created customer {}", customer.id));
            Ok(())
        }
    }

    async fn update(&self, args: &UpdateArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let writer = OutputWriter::new(OutputFormat::from_json_flag(global.json));

        let params = args.fields.build_params()?;
        if params == CustomerParams::default() {
            anyhow::bail!("Nothing to update. Pass at least one field, see --help");
        }

        let customer = client.customers().update(&args.id, &params).await?;

        if global.json {
            writer.write(&customer)
        } else {
            writer.write_success(&format!("Updated customer {}", customer.id));
            Ok(())
        }
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;

        let deleted = client.customers().delete(&args.id).await?;

        if global.json {
            crate::output::write_json(&deleted)
        } else {
            OutputWriter::new(OutputFormat::Table)
                .write_success(&format!("Deleted customer {}", deleted.id));
            Ok(())
        }
    }

    async fn search(&self, args: &SearchArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let writer = OutputWriter::new(OutputFormat::from_json_flag(global.json));

        let mut params = SearchParams::new(&args.query).limit(args.limit);
        if let Some(page) = &args.page {
            params = params.page(page);
        }

        let result = client.customers().search(&params).await?;

        if global.json {
            return crate::output::write_json(&result);
        }

        writer.write_list(&result.data)?;
        if let Some(next) = result.next_page().filter(|_| result.has_next()) {
            println!("{}", style(format!("More results: --page {next}")).dim());
        }
        Ok(())
    }
}

impl TableRow for Customer {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Email", "Created"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.id.clone(),
            truncate(self.name.as_deref().unwrap_or("-"), 30),
            self.email.clone().unwrap_or_else(|| "-".to_string()),
            format_relative_time(self.created),
        ]
    }
}

impl TableOutput for Customer {
    fn print_table(&self, color: bool) {
        print_header(self.name.as_deref().unwrap_or(&self.id));
        println!();
        print_field("ID", &self.id, color);
        if let Some(email) = &self.email {
            print_field("Email", email, color);
        }
        if let Some(phone) = &self.phone {
            print_field("Phone", phone, color);
        }
        if let Some(description) = &self.description {
            print_field("Description", description, color);
        }
        if self.balance != 0 {
            let balance = match &self.currency {
                Some(currency) => format_amount(self.balance, currency),
                None => self.balance.to_string(),
            };
            print_field("Balance", &balance, color);
        }
        if let Some(address) = &self.address {
            let lines: Vec<&str> = [
                &address.line1,
                &address.line2,
                &address.city,
                &address.state,
                &address.postal_code,
                &address.country,
            ]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .collect();
            if !lines.is_empty() {
                print_field("Address", &lines.join(", "), color);
            }
        }
        if !self.preferred_locales.is_empty() {
            print_field("Locales", &self.preferred_locales.join(", "), color);
        }
        if self.delinquent == Some(true) {
            print_field("Delinquent", "yes", color);
        }
        print_field("Created", &format_time(self.created), color);

        if !self.metadata.is_empty() {
            println!();
            println!("  Metadata:");
            for (key, value) in &self.metadata {
                println!("    {} = {}", key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::params::{encode, ToParams};
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(subcommand)]
        command: CustomerSubcommand,
    }

    #[test]
    fn test_create_args_build_address() {
        let cli = Harness::try_parse_from([
            "customers",
            "create",
            "--email",
            "jenny@example.com",
            "--city",
            "Berlin",
            "--balance",
            "-250",
        ])
        .unwrap();
        let CustomerSubcommand::Create(args) = cli.command else {
            panic!("expected create");
        };

        let params = args.build_params().unwrap().to_params();
        assert_eq!(
            encode(&params).unwrap(),
            "address[city]=Berlin&balance=-250&email=jenny%40example.com"
        );
    }

    #[test]
    fn test_empty_update_has_no_fields() {
        let cli = Harness::try_parse_from(["customers", "update", "cus_1"]).unwrap();
        let CustomerSubcommand::Update(args) = cli.command else {
            panic!("expected update");
        };
        assert_eq!(args.fields.build_params().unwrap(), CustomerParams::default());
    }
}
