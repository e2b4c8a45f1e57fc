// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! Polyhole: replay an editing script and print the resulting shapes

fn main() -> anyhow::Result<()> {
    polyhole::run()
}
