// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! Symbology: headless point style editor

fn main() -> anyhow::Result<()> {
    symbology::run()
}
