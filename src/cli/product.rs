//
//  stripe-kit
//  cli/product.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Product commands
//!
//! List, view, create, update, delete and search products.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::api::common::{ListParams, RangeQuery, SearchParams};
use crate::api::params::{Params, ToParams};
use crate::api::resources::products::{
    CreateProductParams, PackageDimensions, PriceData, Product, ProductListParams, Recurring,
    RecurringInterval, UpdateProductParams,
};
use crate::output::{
    format_active, format_bool, print_field, print_header, OutputFormat, OutputWriter, TableOutput,
    TableRow,
};
use crate::util::{format_amount, format_relative_time, format_time, parse_key_value, truncate};

use super::GlobalOptions;

/// Manage products
#[derive(Args, Debug)]
pub struct ProductCommand {
    #[command(subcommand)]
    pub command: ProductSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProductSubcommand {
    /// List products
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View a product
    #[command(visible_alias = "view")]
    Get(GetArgs),

    /// Create a product
    Create(CreateArgs),

    /// Update a product
    #[command(visible_alias = "edit")]
    Update(UpdateArgs),

    /// Delete a product
    Delete(DeleteArgs),

    /// Search products with Stripe's query language
    Search(SearchArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Maximum number of products to list (1-100)
    #[arg(long, short = 'l', default_value = "10", value_parser = clap::value_parser!(u32).range(1..=100))]
    pub limit: u32,

    /// Only active (true) or inactive (false) products
    #[arg(long)]
    pub active: Option<bool>,

    /// Only shippable (true) or non-shippable (false) products
    #[arg(long)]
    pub shippable: Option<bool>,

    /// Only these product IDs (repeatable)
    #[arg(long = "id", value_name = "ID")]
    pub ids: Vec<String>,

    /// Only the product with this URL
    #[arg(long)]
    pub url: Option<String>,

    /// Created at or after this Unix timestamp
    #[arg(long, value_name = "TIMESTAMP")]
    pub created_after: Option<i64>,

    /// Created before this Unix timestamp
    #[arg(long, value_name = "TIMESTAMP")]
    pub created_before: Option<i64>,

    /// Cursor: list products after this ID
    #[arg(long, value_name = "ID")]
    pub starting_after: Option<String>,

    /// Cursor: list products before this ID
    #[arg(long, value_name = "ID", conflicts_with = "starting_after")]
    pub ending_before: Option<String>,

    /// Extra filters as a JSON object, merged over the flags above
    #[arg(long, value_name = "JSON")]
    pub filter: Option<String>,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Product ID
    pub id: String,

    /// Fields to expand, e.g. default_price (repeatable)
    #[arg(long, short = 'e')]
    pub expand: Vec<String>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Product name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Custom product ID
    #[arg(long)]
    pub id: Option<String>,

    /// Product description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Whether the product can be bought
    #[arg(long)]
    pub active: Option<bool>,

    /// Metadata entry as KEY=VALUE (repeatable)
    #[arg(long, short = 'm', value_name = "KEY=VALUE")]
    pub metadata: Vec<String>,

    /// Image URL (repeatable, up to 8)
    #[arg(long = "image", value_name = "URL")]
    pub images: Vec<String>,

    /// Default price in the smallest currency unit, e.g. 2000 for $20.00
    #[arg(long, value_name = "AMOUNT")]
    pub price: Option<i64>,

    /// Currency of the default price
    #[arg(long, default_value = "usd")]
    pub currency: String,

    /// Make the default price recurring
    #[arg(long, requires = "price")]
    pub interval: Option<RecurringInterval>,

    /// Intervals between bills
    #[arg(long, requires = "interval")]
    pub interval_count: Option<u32>,

    #[command(flatten)]
    pub dimensions: DimensionArgs,

    /// Whether the product is a physical good
    #[arg(long)]
    pub shippable: Option<bool>,

    /// Text shown on card statements (up to 22 characters)
    #[arg(long)]
    pub statement_descriptor: Option<String>,

    /// Tax code ID
    #[arg(long)]
    pub tax_code: Option<String>,

    /// Unit label shown on receipts and invoices
    #[arg(long)]
    pub unit_label: Option<String>,

    /// Public product page URL
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Product ID
    pub id: String,

    /// New name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// New description (empty string clears it)
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Whether the product can be bought
    #[arg(long)]
    pub active: Option<bool>,

    /// ID of an existing price to make the default
    #[arg(long, value_name = "PRICE_ID")]
    pub default_price: Option<String>,

    /// Metadata entry as KEY=VALUE; KEY= removes the key (repeatable)
    #[arg(long, short = 'm', value_name = "KEY=VALUE")]
    pub metadata: Vec<String>,

    /// Remove all metadata
    #[arg(long, conflicts_with = "metadata")]
    pub clear_metadata: bool,

    /// Replace the image list (repeatable)
    #[arg(long = "image", value_name = "URL")]
    pub images: Vec<String>,

    #[command(flatten)]
    pub dimensions: DimensionArgs,

    #[arg(long)]
    pub shippable: Option<bool>,

    #[arg(long)]
    pub statement_descriptor: Option<String>,

    #[arg(long)]
    pub tax_code: Option<String>,

    #[arg(long)]
    pub unit_label: Option<String>,

    #[arg(long)]
    pub url: Option<String>,
}

/// Package dimensions; all four must be given together.
#[derive(Args, Debug)]
pub struct DimensionArgs {
    /// Package height in inches
    #[arg(long, requires_all = ["length", "weight", "width"])]
    pub height: Option<f64>,

    /// Package length in inches
    #[arg(long, requires = "height")]
    pub length: Option<f64>,

    /// Package weight in ounces
    #[arg(long, requires = "height")]
    pub weight: Option<f64>,

    /// Package width in inches
    #[arg(long, requires = "height")]
    pub width: Option<f64>,
}

impl DimensionArgs {
    fn to_dimensions(&self) -> Option<PackageDimensions> {
        Some(PackageDimensions {
            height: self.height?,
            length: self.length?,
            weight: self.weight?,
            width: self.width?,
        })
    }
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Product ID
    pub id: String,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query, e.g. "active:'true' AND name~'shirt'"
    pub query: String,

    /// Maximum number of results (1-100)
    #[arg(long, short = 'l', default_value = "10", value_parser = clap::value_parser!(u32).range(1..=100))]
    pub limit: u32,

    /// next_page token from a previous search
    #[arg(long)]
    pub page: Option<String>,
}

impl ProductCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ProductSubcommand::List(args) => self.list(args, global).await,
            ProductSubcommand::Get(args) => self.get(args, global).await,
            ProductSubcommand::Create(args) => self.create(args, global).await,
            ProductSubcommand::Update(args) => self.update(args, global).await,
            ProductSubcommand::Delete(args) => self.delete(args, global).await,
            ProductSubcommand::Search(args) => self.search(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let writer = OutputWriter::new(OutputFormat::from_json_flag(global.json));

        let params = list_params(args);
        let page = match &args.filter {
            Some(filter) => {
                let json: serde_json::Value =
                    serde_json::from_str(filter).context("--filter must be a JSON object")?;
                let extra = Params::try_from(json)?;
                client
                    .products()
                    .list_all_with(&params.to_params().merge(extra))
                    .await?
            }
            None => client.products().list_all(&params).await?,
        };

        if global.json {
            return crate::output::write_json(&page);
        }

        writer.write_list(&page.data)?;
        if let Some(cursor) = page.next_cursor() {
            println!(
                "{}",
                style(format!("More products available: --starting-after {cursor}")).dim()
            );
        }
        Ok(())
    }

    async fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let writer = OutputWriter::new(OutputFormat::from_json_flag(global.json));

        let product = client.products().retrieve(&args.id, &args.expand).await?;
        writer.write(&product)
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let writer = OutputWriter::new(OutputFormat::from_json_flag(global.json));

        let params = create_params(args)?;
        let product = client.products().create(&params).await?;

        if global.json {
            writer.write(&product)
        } else {
            writer.write_success(&format!("Created product {} ({})", product.name, product.id));
            Ok(())
        }
    }

    async fn update(&self, args: &UpdateArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let writer = OutputWriter::new(OutputFormat::from_json_flag(global.json));

        let params = update_params(args)?;
        if params == UpdateProductParams::default() {
            anyhow::bail!("Nothing to update. Pass at least one field, see --help");
        }

        let product = client.products().update(&args.id, &params).await?;

        if global.json {
            writer.write(&product)
        } else {
            writer.write_success(&format!("Updated product {}", product.id));
            Ok(())
        }
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;

        let deleted = client.products().delete(&args.id).await?;

        if global.json {
            crate::output::write_json(&deleted)
        } else {
            OutputWriter::new(OutputFormat::Table)
                .write_success(&format!("Deleted product {}", deleted.id));
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

        let result = client.products().search(&params).await?;

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

fn list_params(args: &ListArgs) -> ProductListParams {
    let mut list = ListParams::new().limit(args.limit);
    if let Some(id) = &args.starting_after {
        list = list.starting_after(id);
    }
    if let Some(id) = &args.ending_before {
        list = list.ending_before(id);
    }
    list = list.created(RangeQuery::Bounds {
        gt: None,
        gte: args.created_after,
        lt: args.created_before,
        lte: None,
    });

    ProductListParams {
        list,
        active: args.active,
        ids: (!args.ids.is_empty()).then(|| args.ids.clone()),
        shippable: args.shippable,
        url: args.url.clone(),
    }
}

fn create_params(args: &CreateArgs) -> Result<CreateProductParams> {
    let mut params = CreateProductParams::new(&args.name);
    params.id = args.id.clone();
    params.description = args.description.clone();
    params.active = args.active;
    params.shippable = args.shippable;
    params.statement_descriptor = args.statement_descriptor.clone();
    params.tax_code = args.tax_code.clone();
    params.unit_label = args.unit_label.clone();
    params.url = args.url.clone();
    params.package_dimensions = args.dimensions.to_dimensions();

    for entry in &args.metadata {
        let (key, value) = parse_key_value(entry)?;
        params = params.metadata(key, value);
    }
    for image in &args.images {
        params = params.image(image);
    }

    if let Some(amount) = args.price {
        let mut price = PriceData::new(args.currency.to_lowercase()).unit_amount(amount);
        if let Some(interval) = args.interval {
            let mut recurring = Recurring::new(interval);
            recurring.interval_count = args.interval_count;
            price = price.recurring(recurring);
        }
        params = params.default_price_data(price);
    }

    Ok(params)
}

fn update_params(args: &UpdateArgs) -> Result<UpdateProductParams> {
    let mut params = UpdateProductParams {
        active: args.active,
        default_price: args.default_price.clone(),
        description: args.description.clone(),
        name: args.name.clone(),
        images: (!args.images.is_empty()).then(|| args.images.clone()),
        package_dimensions: args.dimensions.to_dimensions(),
        shippable: args.shippable,
        statement_descriptor: args.statement_descriptor.clone(),
        tax_code: args.tax_code.clone(),
        unit_label: args.unit_label.clone(),
        url: args.url.clone(),
        ..Default::default()
    };

    if args.clear_metadata {
        params = params.clear_metadata();
    }
    for entry in &args.metadata {
        let (key, value) = parse_key_value(entry)?;
        params = params.metadata(key, value);
    }

    Ok(params)
}

impl TableRow for Product {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Status", "Default price", "Created"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.id.clone(),
            truncate(&self.name, 40),
            format_active(self.active, color),
            default_price_display(self),
            format_relative_time(self.created),
        ]
    }
}

impl TableOutput for Product {
    fn print_table(&self, color: bool) {
        print_header(&self.name);
        println!();
        print_field("ID", &self.id, color);
        print_field("Status", &format_active(self.active, color), color);
        print_field("Default price", &default_price_display(self), color);
        if let Some(description) = &self.description {
            print_field("Description", description, color);
        }
        if let Some(shippable) = self.shippable {
            print_field("Shippable", &format_bool(shippable, color), color);
        }
        if let Some(dims) = &self.package_dimensions {
            print_field(
                "Package",
                &format!(
                    "{} x {} x {} in, {} oz",
                    dims.length, dims.width, dims.height, dims.weight
                ),
                color,
            );
        }
        if let Some(descriptor) = &self.statement_descriptor {
            print_field("Statement descriptor", descriptor, color);
        }
        if let Some(code) = &self.tax_code {
            print_field("Tax code", code, color);
        }
        if let Some(label) = &self.unit_label {
            print_field("Unit label", label, color);
        }
        if let Some(url) = &self.url {
            print_field("URL", url, color);
        }
        for image in &self.images {
            print_field("Image", image, color);
        }
        print_field("Mode", if self.livemode { "live" } else { "test" }, color);
        print_field("Created", &format_time(self.created), color);
        if let Some(updated) = self.updated {
            print_field("Updated", &format_time(updated), color);
        }

        if !self.metadata.is_empty() {
            println!();
            println!("  Metadata:");
            for (key, value) in &self.metadata {
                println!("    {} = {}", key, value);
            }
        }
    }
}

fn default_price_display(product: &Product) -> String {
    match &product.default_price {
        None => "-".to_string(),
        Some(price) => match price.as_object() {
            Some(price) => match price.unit_amount {
                Some(amount) => {
                    let base = format_amount(amount, &price.currency);
                    match &price.recurring {
                        Some(r) => format!("{base} / {}", r.interval),
                        None => base,
                    }
                }
                None => price.id.clone(),
            },
            None => price.id().to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::params::encode;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(subcommand)]
        command: ProductSubcommand,
    }

    fn parse(args: &[&str]) -> ProductSubcommand {
        let mut argv = vec!["products"];
        argv.extend_from_slice(args);
        Harness::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn test_create_args_to_params() {
        let ProductSubcommand::Create(args) = parse(&[
            "create",
            "--name",
            "Gold plan",
            "-m",
            "tier=gold",
            "--price",
            "2000",
            "--interval",
            "month",
        ]) else {
            panic!("expected create");
        };

        let params = create_params(&args).unwrap().to_params();
        assert_eq!(
            encode(&params).unwrap(),
            "default_price_data[currency]=usd\
             &default_price_data[recurring][interval]=month\
             &default_price_data[unit_amount]=2000\
             &metadata[tier]=gold\
             &name=Gold%20plan"
        );
    }

    #[test]
    fn test_dimensions_require_all_four() {
        let result = Harness::try_parse_from(["products", "create", "--name", "Box", "--height", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_args_omit_untouched_fields() {
        let ProductSubcommand::Update(args) = parse(&["update", "prod_1", "--active", "false"]) else {
            panic!("expected update");
        };
        let params = update_params(&args).unwrap();
        assert_eq!(encode(&params.to_params()).unwrap(), "active=false");
    }

    #[test]
    fn test_list_args_created_range() {
        let ProductSubcommand::List(args) = parse(&["list", "--created-after", "100", "--id", "prod_1"]) else {
            panic!("expected list");
        };
        let params = list_params(&args).to_params();
        assert_eq!(
            encode(&params).unwrap(),
            "created[gte]=100&ids[0]=prod_1&limit=10"
        );
    }

    #[test]
    fn test_list_args_without_dates_send_no_created() {
        let ProductSubcommand::List(args) = parse(&["list"]) else {
            panic!("expected list");
        };
        let params = list_params(&args).to_params();
        assert_eq!(encode(&params).unwrap(), "limit=10");
    }
}
